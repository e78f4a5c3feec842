pub mod components;
pub mod config;
pub mod scene;
pub mod systems;
pub mod world;

use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use components::marker::Rgb;
use config::SceneConfig;
use scene::GlobeScene;
use systems::{
    material::{HttpTextureFetcher, MaterialSystem, OfflineTextureFetcher, TextureFetcher},
    presentation::{Deck, KeyHint},
    readiness::readiness,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

// column-major, the layout the shaders expect
pub fn matrix4_to_array(mat: cgmath::Matrix4<f64>) -> [[f32; 4]; 4] {
    let m: [[f64; 4]; 4] = mat.into();
    m.map(|column| column.map(|value| value as f32))
}

/// Installs the fmt subscriber, filtered by `RUST_LOG` (default `info`).
/// Safe to call more than once.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub config: SceneConfig,
    pub viewport: (u32, u32),
    pub frames: u32,
    pub slides: usize,
    /// Zero-based index of the slide hosting the globe.
    pub globe_slide: usize,
    pub offline: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            config: SceneConfig::default(),
            viewport: (1280, 720),
            frames: 120,
            slides: 6,
            globe_slide: 2,
            offline: false,
        }
    }
}

const FRAME: Duration = Duration::from_micros(16_667);

/// Loads the globe materials and builds the scene. Texture failures fall back
/// to the solid globe and the procedural cloud layer.
pub async fn build_globe<F: TextureFetcher>(
    fetcher: &F,
    config: SceneConfig,
    viewport: (u32, u32),
) -> GlobeScene {
    let appearance = MaterialSystem::load_earth_appearance(
        fetcher,
        &config.earth_textures,
        Rgb(config.fallback_color),
    )
    .await;
    let cloud_texture = MaterialSystem::load_first_available(fetcher, &config.cloud_textures)
        .await
        .map(|texture| texture.image);
    if cloud_texture.is_none() {
        info!("no cloud texture, only the procedural cloud layer will show");
    }
    GlobeScene::build(config, viewport, appearance, cloud_texture)
}

/// Headless run of the globe slide: waits for the deck, navigates to the globe
/// slide, builds the scene and plays `frames` frames followed by a click on
/// the canvas centre.
pub async fn run(options: RunOptions) -> anyhow::Result<()> {
    let RunOptions {
        config,
        viewport,
        frames,
        slides,
        globe_slide,
        offline,
    } = options;
    config.validate()?;

    let mut deck = Deck::new(slides, [globe_slide]);
    for hint in ['s', 'f', 'b'].into_iter().filter_map(KeyHint::from_key) {
        info!("{}", hint.message());
    }
    let (deck_ready, wait_for_deck) = readiness("slide deck");
    tokio::spawn(async move { deck_ready.notify() });
    wait_for_deck
        .wait(config.readiness_timeout())
        .await
        .context("globe cannot start")?;

    let change = deck
        .follow_menu(&format!("#/{}", globe_slide + 1))
        .context("globe slide is not in the menu")?;
    info!(
        slide = change.index,
        progress = change.progress_pct,
        href = %change.active_href,
        "slide changed"
    );
    if !change.needs_globe {
        warn!(slide = change.index, "slide does not host the globe, nothing to show");
        return Ok(());
    }

    let mut scene = if offline {
        build_globe(&OfflineTextureFetcher, config, viewport).await
    } else {
        build_globe(&HttpTextureFetcher::new(), config, viewport).await
    };
    deck.attach_globe();

    let mut elapsed = Duration::ZERO;
    for _ in 0..frames {
        elapsed += FRAME;
        scene.tick(elapsed);
    }
    info!(
        frames,
        rotation = scene.earth().rotation_y,
        cloud_time = scene.cloud_time(),
        instances = scene.marker_instances().len(),
        "frames played"
    );

    let now = Utc::now();
    let (width, height) = viewport;
    match scene.click(width as f64 / 2.0, height as f64 / 2.0, now) {
        Some(_) => {
            if let Some(text) = scene.panel_text(now) {
                info!("info panel:\n{text}");
            }
        }
        None => warn!("centre click missed the globe"),
    }

    Ok(())
}
