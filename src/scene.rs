use std::time::Duration;

use chrono::{DateTime, Utc};
use image::RgbaImage;
use tracing::info;

use crate::{
    components::{
        camera::{CameraComponent, CameraUniform, ControlInput},
        earth::{CloudShellComponent, EarthAppearance, EarthComponent, ProceduralCloudsComponent},
        marker::{co2_readings, vegetation_markers, Co2Component, MarkerComponent, Rgb},
        panel::{ClickInfo, InfoPanel},
        transform::MarkerInstance,
    },
    config::SceneConfig,
    systems::{
        camera::CameraSystem,
        marker::MarkerSystem,
        window::{PickTarget, WindowSystem},
    },
    world::World,
};

const SPECULAR: Rgb = Rgb(0x333333);
const SHININESS: f32 = 10.0;

/// Everything the globe slide owns, handed to whoever drives the frame loop.
pub struct GlobeScene {
    config: SceneConfig,
    world: World,
    earth: EarthComponent,
    clouds: ProceduralCloudsComponent,
    cloud_shell: Option<CloudShellComponent>,
    camera_component: CameraComponent,
    panel: InfoPanel,
    viewport: (u32, u32),
    is_rotating: bool,
}

impl GlobeScene {
    pub fn build(
        config: SceneConfig,
        viewport: (u32, u32),
        appearance: EarthAppearance,
        cloud_texture: Option<RgbaImage>,
    ) -> Self {
        let earth = EarthComponent {
            radius: config.globe_radius,
            rotation_y: 0.0,
            appearance,
            specular: SPECULAR,
            shininess: SHININESS,
        };
        let clouds = ProceduralCloudsComponent {
            radius: config.cloud_radius,
            time: 0.0,
        };
        let cloud_shell = cloud_texture.map(|texture| CloudShellComponent {
            radius: config.cloud_radius,
            rotation_y: 0.0,
            opacity: config.cloud_opacity,
            texture,
        });

        let mut world = World::new();
        MarkerSystem::spawn_markers(&mut world, vegetation_markers(), config.marker_radius);
        MarkerSystem::spawn_co2_readings(&mut world, co2_readings(), config.co2_radius);

        let camera_component =
            CameraSystem::create_camera(viewport.0, viewport.1, &config.camera);

        info!(
            markers = world.entities_count,
            textured = earth.appearance.is_textured(),
            cloud_shell = cloud_shell.is_some(),
            "globe scene built"
        );

        Self {
            config,
            world,
            earth,
            clouds,
            cloud_shell,
            camera_component,
            panel: InfoPanel::new(),
            viewport,
            is_rotating: true,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn earth(&self) -> &EarthComponent {
        &self.earth
    }

    pub fn cloud_shell(&self) -> Option<&CloudShellComponent> {
        self.cloud_shell.as_ref()
    }

    pub fn cloud_time(&self) -> f32 {
        self.clouds.time
    }

    pub fn markers(&self) -> Vec<&MarkerComponent> {
        self.world
            .query_entities_with::<MarkerComponent>()
            .into_iter()
            .filter_map(|entity| self.world.get_component::<MarkerComponent>(entity))
            .collect()
    }

    pub fn co2_points(&self) -> Vec<&Co2Component> {
        self.world
            .query_entities_with::<Co2Component>()
            .into_iter()
            .filter_map(|entity| self.world.get_component::<Co2Component>(entity))
            .collect()
    }

    pub fn is_rotating(&self) -> bool {
        self.is_rotating
    }

    pub fn toggle_rotation(&mut self) -> bool {
        self.is_rotating = !self.is_rotating;
        info!(rotating = self.is_rotating, "globe rotation toggled");
        self.is_rotating
    }

    /// Advances one display frame. `elapsed` is time since the scene was
    /// built and drives the marker pulse.
    pub fn tick(&mut self, elapsed: Duration) {
        if self.is_rotating {
            self.earth.rotation_y += self.config.rotation_speed;
            if let Some(shell) = self.cloud_shell.as_mut() {
                shell.rotation_y += self.config.cloud_rotation_speed;
            }
        }
        self.clouds.time += self.config.cloud_time_step;

        MarkerSystem::update_pulse(&mut self.world, elapsed);
        CameraSystem::update(&mut self.camera_component);
    }

    pub fn control(&mut self, input: ControlInput) -> bool {
        self.camera_component.camera_controller.process_input(input)
    }

    pub fn reset_view(&mut self) {
        let CameraComponent {
            camera,
            camera_controller,
            ..
        } = &mut self.camera_component;
        camera_controller.reset(camera);

        self.earth.rotation_y = 0.0;
        if let Some(shell) = self.cloud_shell.as_mut() {
            shell.rotation_y = 0.0;
        }
        self.camera_component
            .camera_uniform
            .update_view_proj(&self.camera_component.camera);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.viewport = (width, height);
            self.camera_component.camera.set_viewport(width, height);
            self.camera_component
                .camera_uniform
                .update_view_proj(&self.camera_component.camera);
        }
    }

    /// Resolves a click at canvas pixel (x, y) and shows the result in the
    /// info panel. Misses leave the panel untouched.
    pub fn click(&mut self, x: f64, y: f64, now: DateTime<Utc>) -> Option<ClickInfo> {
        let target = PickTarget {
            radius: self.config.globe_radius,
            rotation_y: self.earth.rotation_y,
            tolerance: self.config.hit_tolerance,
        };
        let info = WindowSystem::handle_left_click(
            self.viewport.0 as f64,
            self.viewport.1 as f64,
            x,
            y,
            target,
            &self.camera_component.camera,
        )?;
        info!(
            "clicked lat {:.1}°, lng {:.1}°: {}",
            info.geo.latitude, info.geo.longitude, info.region.name
        );
        self.panel
            .show(info.clone(), now, self.config.panel_visible_for());
        Some(info)
    }

    pub fn panel_text(&self, now: DateTime<Utc>) -> Option<String> {
        self.panel.text(now)
    }

    pub fn camera_component(&self) -> &CameraComponent {
        &self.camera_component
    }

    pub fn camera_uniform(&self) -> CameraUniform {
        self.camera_component.camera_uniform
    }

    pub fn marker_instances(&self) -> Vec<MarkerInstance> {
        MarkerSystem::instances(&self.world, self.earth.rotation_y)
    }
}
