use std::future::Future;

use anyhow::Context;
use image::{Rgba, RgbaImage};
use tracing::{info, warn};

use crate::components::{earth::EarthAppearance, marker::Rgb};

/// Fetches raw texture bytes from wherever a source string points.
pub trait TextureFetcher {
    fn fetch(&self, source: &str) -> impl Future<Output = anyhow::Result<Vec<u8>>> + Send;
}

/// Pulls textures over HTTP(S).
#[derive(Clone, Default)]
pub struct HttpTextureFetcher {
    client: reqwest::Client,
}

impl HttpTextureFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TextureFetcher for HttpTextureFetcher {
    fn fetch(&self, source: &str) -> impl Future<Output = anyhow::Result<Vec<u8>>> + Send {
        let request = self.client.get(source);
        let source = source.to_string();
        async move {
            let response = request
                .send()
                .await
                .with_context(|| format!("request to {source} failed"))?
                .error_for_status()
                .with_context(|| format!("{source} answered with an error status"))?;
            let bytes = response
                .bytes()
                .await
                .with_context(|| format!("failed to read body of {source}"))?;
            Ok(bytes.to_vec())
        }
    }
}

/// Never reaches the network; every source fails. Used for offline runs.
#[derive(Clone, Copy, Default)]
pub struct OfflineTextureFetcher;

impl TextureFetcher for OfflineTextureFetcher {
    fn fetch(&self, source: &str) -> impl Future<Output = anyhow::Result<Vec<u8>>> + Send {
        let source = source.to_string();
        async move { Err(anyhow::anyhow!("offline, not fetching {source}")) }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedTexture {
    pub source: String,
    pub image: RgbaImage,
}

pub struct MaterialSystem {}

impl MaterialSystem {
    pub fn decode_texture(bytes: &[u8]) -> anyhow::Result<RgbaImage> {
        let image = image::load_from_memory(bytes).context("failed to decode texture")?;
        Ok(image.to_rgba8())
    }

    /// Tries each source in order and returns the first one that both
    /// downloads and decodes. Failures are logged, never propagated.
    pub async fn load_first_available<F: TextureFetcher>(
        fetcher: &F,
        sources: &[String],
    ) -> Option<LoadedTexture> {
        for source in sources {
            let attempt = async {
                let bytes = fetcher.fetch(source).await?;
                Self::decode_texture(&bytes)
            };
            match attempt.await {
                Ok(image) => {
                    info!(source = %source, width = image.width(), height = image.height(), "texture loaded");
                    return Some(LoadedTexture {
                        source: source.clone(),
                        image,
                    });
                }
                Err(err) => warn!(source = %source, "texture unavailable: {err:#}"),
            }
        }
        None
    }

    pub async fn load_earth_appearance<F: TextureFetcher>(
        fetcher: &F,
        sources: &[String],
        fallback: Rgb,
    ) -> EarthAppearance {
        match Self::load_first_available(fetcher, sources).await {
            Some(LoadedTexture { source, image }) => EarthAppearance::Textured { source, image },
            None => {
                warn!("no earth texture could be loaded, using a solid colour globe");
                EarthAppearance::Solid { color: fallback }
            }
        }
    }

    fn noise(x: f32, y: f32) -> f32 {
        (x * 10.0).sin() * (y * 6.0).sin() * 0.5 + 0.5
    }

    fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
        let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
        t * t * (3.0 - 2.0 * t)
    }

    /// Cloud alpha at texture coordinate (u, v) for shader time `time`.
    /// Three drifting noise octaves, thresholded, thinned towards the poles.
    pub fn cloud_density(u: f32, v: f32, time: f32) -> f32 {
        let (x, y) = (u * 3.0, v * 3.0);

        let cloud1 = Self::noise(x + time * 0.1, y + time * 0.1);
        let cloud2 = Self::noise(x * 1.5 - time * 0.05, y * 1.5 - time * 0.05) * 0.7;
        let cloud3 = Self::noise(x * 2.0 + time * 0.03, y * 2.0 + time * 0.03) * 0.5;

        let clouds = cloud1 * 0.4 + cloud2 * 0.3 + cloud3 * 0.3;
        let clouds = Self::smoothstep(0.3, 0.7, clouds);

        let edge = 1.0 - Self::smoothstep(0.45, 0.55, (v - 0.5).abs());
        clouds * edge * 0.35
    }

    /// Bakes the procedural cloud layer into a white RGBA texture.
    pub fn cloud_texture(width: u32, height: u32, time: f32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |px, py| {
            let u = (px as f32 + 0.5) / width as f32;
            // texture rows run top-down, uv v runs bottom-up
            let v = 1.0 - (py as f32 + 0.5) / height as f32;
            let alpha = Self::cloud_density(u, v, time);
            Rgba([255, 255, 255, (alpha * 255.0).round() as u8])
        })
    }
}
