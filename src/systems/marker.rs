use std::time::Duration;

use cgmath::{Matrix4, Rad};
use tracing::{debug, info};

use crate::{
    components::{
        marker::{pulse_scale, Co2Component, Co2Reading, Marker, MarkerComponent},
        transform::{AppearanceComponent, MarkerInstance, TransformComponent},
    },
    matrix4_to_array,
    world::{EntityId, World},
};

use super::geospatial::coordinates::{CoordinatesSystem, SpherePoint};

const MARKER_OPACITY: f32 = 0.8;
const CO2_OPACITY: f32 = 0.7;

pub struct MarkerSystem {}

impl MarkerSystem {
    /// Projects each marker onto a sphere of `placement_radius`, in list order.
    pub fn place(markers: &[Marker], placement_radius: f64) -> Vec<SpherePoint> {
        markers
            .iter()
            .map(|marker| CoordinatesSystem::forward_project(marker.position, placement_radius))
            .collect()
    }

    pub fn spawn_markers(
        world: &mut World,
        markers: Vec<Marker>,
        placement_radius: f64,
    ) -> Vec<EntityId> {
        let entities: Vec<EntityId> = markers
            .into_iter()
            .map(|marker| {
                let position = CoordinatesSystem::forward_project(marker.position, placement_radius);
                debug!(
                    label = %marker.label,
                    vegetation = marker.category.label(),
                    x = position.x,
                    y = position.y,
                    z = position.z,
                    "placing vegetation marker"
                );

                let entity = world.new_entity();
                world.add_component_to_entity(
                    entity,
                    TransformComponent::new(position.to_vector(), marker.radius),
                );
                world.add_component_to_entity(
                    entity,
                    AppearanceComponent {
                        color: marker.color,
                        opacity: MARKER_OPACITY,
                    },
                );
                world.add_component_to_entity(entity, MarkerComponent { marker, position });
                entity
            })
            .collect();

        info!("added {} vegetation markers", entities.len());
        entities
    }

    pub fn spawn_co2_readings(
        world: &mut World,
        readings: Vec<Co2Reading>,
        placement_radius: f64,
    ) -> Vec<EntityId> {
        readings
            .into_iter()
            .map(|reading| {
                let position =
                    CoordinatesSystem::forward_project(reading.position, placement_radius);
                let entity = world.new_entity();
                world.add_component_to_entity(
                    entity,
                    TransformComponent::new(position.to_vector(), reading.size()),
                );
                world.add_component_to_entity(
                    entity,
                    AppearanceComponent {
                        color: reading.color(),
                        opacity: CO2_OPACITY,
                    },
                );
                world.add_component_to_entity(entity, Co2Component { reading, position });
                entity
            })
            .collect()
    }

    pub fn update_pulse(world: &mut World, elapsed: Duration) {
        let scale = pulse_scale(elapsed);
        for entity in world.query_entities_with::<TransformComponent>() {
            if let Some(transform) = world.get_component_mut::<TransformComponent>(entity) {
                transform.pulse = scale;
            }
        }
    }

    /// Instance data for every marker-like entity, carried along by the
    /// globe's current spin.
    pub fn instances(world: &World, globe_rotation_y: f64) -> Vec<MarkerInstance> {
        let globe = Matrix4::from_angle_y(Rad(globe_rotation_y));
        world
            .query_entities_with_both::<TransformComponent, AppearanceComponent>()
            .into_iter()
            .filter_map(|entity| {
                let transform = world.get_component::<TransformComponent>(entity)?;
                let appearance = world.get_component::<AppearanceComponent>(entity)?;
                Some(MarkerInstance {
                    model: matrix4_to_array(globe * transform.model_matrix()),
                    color: appearance.color.to_rgba_f32(appearance.opacity),
                })
            })
            .collect()
    }
}
