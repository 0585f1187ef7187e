mod cli;
mod logging;
mod scene;

use std::time::Instant;

use batchr_common::{BatchrError, Color, ConfigError};
use batchr_config::BatchrConfig;
use batchr_renderer::{
    BatchLimits, BatchRenderer, GpuContext, OrthographicCamera2D, RecordingBackend,
    RenderBackend, Texture, WgpuBackend,
};

use crate::cli::Args;
use crate::logging::FilterHandle;
use crate::scene::{checker_texture, render_frame, SpriteGrid, CHECKER_SIZE};

fn read_config(args: &Args) -> Result<BatchrConfig, ConfigError> {
    match &args.config {
        Some(path) => batchr_config::load_from_path(path),
        None => batchr_config::load_config(),
    }
}

/// Load the config, falling back to defaults, and apply its log level
/// unless `--log-level` was given.
fn load_config(args: &Args, filter: &FilterHandle) -> BatchrConfig {
    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {}", path.display());
    }
    let config = read_config(args).unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        BatchrConfig::default()
    });
    if args.log_level.is_none() {
        logging::apply_level(filter, config.logging.level.as_directive());
    }
    config
}

fn main() {
    // Parse CLI arguments
    let args = cli::parse();

    // Initialize logging before anything can emit events
    let filter = logging::init(args.log_level.as_deref().unwrap_or(logging::DEFAULT_LEVEL));

    tracing::info!("batchr v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = load_config(&args, &filter);

    if args.print_config {
        println!("{}", batchr_config::config_to_json(&config));
        return;
    }

    if let Err(e) = run(&args, &config) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
    tracing::info!("Shutdown complete");
}

fn run(args: &Args, config: &BatchrConfig) -> batchr_common::Result<()> {
    let limits = BatchLimits::from(&config.batch);
    let (width, height) = (config.render.width, config.render.height);

    if args.dry_run {
        if args.output.is_some() {
            tracing::warn!("--output is ignored with --dry-run");
        }
        let renderer = BatchRenderer::init(RecordingBackend::without_vertex_capture(), limits)?;
        let renderer = run_frames(renderer, args, width, height)?;
        let backend = renderer.shutdown();
        tracing::info!("Dry run recorded {} draw calls", backend.draw_count());
        return Ok(());
    }

    let clear = Color::from_hex(&config.render.clear_color).unwrap_or_else(|| {
        tracing::warn!(
            "Invalid clear color {:?}, using black",
            config.render.clear_color
        );
        Color::BLACK
    });

    let ctx = pollster::block_on(GpuContext::new_headless())?;
    let backend = WgpuBackend::new(ctx, width, height, clear)?;
    let renderer = BatchRenderer::init(backend, limits)?;
    let renderer = run_frames(renderer, args, width, height)?;

    if let Some(path) = &args.output {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        let image = renderer.backend().read_pixels()?;
        image
            .save(path)
            .map_err(|e| BatchrError::Image(format!("{}: {e}", path.display())))?;
        tracing::info!("Wrote {}", path.display());
    }

    renderer.shutdown();
    Ok(())
}

/// Render `args.frames` frames of the sprite grid and log per-frame stats.
fn run_frames<B: RenderBackend>(
    mut renderer: BatchRenderer<B>,
    args: &Args,
    width: u32,
    height: u32,
) -> batchr_common::Result<BatchRenderer<B>> {
    let textures = (0..args.textures)
        .map(|i| renderer.create_texture_from_image(&checker_texture(i, CHECKER_SIZE)))
        .collect::<Result<Vec<Texture>, _>>()?;

    let aspect = width as f32 / height as f32;
    let camera = OrthographicCamera2D::new(aspect, 1.0);
    let grid = SpriteGrid::new(args.quads, aspect);
    tracing::info!(
        quads = args.quads,
        textures = textures.len(),
        columns = grid.columns(),
        "Scene ready"
    );

    renderer.resize(width, height);
    for frame in 0..args.frames {
        let start = Instant::now();
        let stats = render_frame(&mut renderer, &camera, &grid, &textures, args.quads, frame);
        tracing::info!(
            frame,
            draw_calls = stats.draw_calls,
            quads = stats.quads,
            vertices = stats.vertices(),
            arena_flushes = stats.arena_flushes,
            slot_flushes = stats.slot_flushes,
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Frame submitted"
        );
    }

    for texture in textures {
        renderer.destroy_texture(texture);
    }
    Ok(renderer)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    use clap::Parser;

    use super::*;

    /// Log sink shared between the subscriber and the test.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn write_config(dir: &tempfile::TempDir, body: &str) -> String {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, body).unwrap();
        path.display().to_string()
    }

    #[test]
    fn config_validation_warning_reaches_the_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[batch]\nmax_texture_slots = 64\n");
        let args = Args::parse_from(["batchr", "--config", &path]);

        let sink = Captured::default();
        let writer = sink.clone();
        let (subscriber, filter) = logging::subscriber("info", move || writer.clone());
        let config =
            tracing::subscriber::with_default(subscriber, || load_config(&args, &filter));

        assert_eq!(config.batch.max_texture_slots, 64);
        let log = sink.text();
        assert!(log.contains("config validation warning"), "log was: {log}");
        assert!(log.contains("loaded config from"), "log was: {log}");
    }

    #[test]
    fn missing_config_falls_back_to_defaults_with_a_warning() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml").display().to_string();
        let args = Args::parse_from(["batchr", "--config", &path]);

        let sink = Captured::default();
        let writer = sink.clone();
        let (subscriber, filter) = logging::subscriber("info", move || writer.clone());
        let config =
            tracing::subscriber::with_default(subscriber, || load_config(&args, &filter));

        assert_eq!(config.batch.max_quads, BatchrConfig::default().batch.max_quads);
        assert!(sink.text().contains("Config load failed, using defaults"));
    }

    #[test]
    fn config_log_level_takes_effect_after_loading() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[logging]\nlevel = \"error\"\n");
        let args = Args::parse_from(["batchr", "--config", &path]);

        let sink = Captured::default();
        let writer = sink.clone();
        let (subscriber, filter) = logging::subscriber("info", move || writer.clone());
        tracing::subscriber::with_default(subscriber, || {
            load_config(&args, &filter);
            tracing::info!("after the config");
        });

        let log = sink.text();
        assert!(log.contains("loaded config from"), "log was: {log}");
        assert!(!log.contains("after the config"), "log was: {log}");
    }

    #[test]
    fn cli_log_level_overrides_the_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[logging]\nlevel = \"error\"\n");
        let args = Args::parse_from(["batchr", "--config", &path, "--log-level", "info"]);

        let sink = Captured::default();
        let writer = sink.clone();
        let (subscriber, filter) = logging::subscriber("info", move || writer.clone());
        tracing::subscriber::with_default(subscriber, || {
            load_config(&args, &filter);
            tracing::info!("after the config");
        });

        assert!(sink.text().contains("after the config"));
    }
}
