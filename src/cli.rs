//! Headless offline render driver.
//!
//! Streams a recorded (or synthetic) sample sequence into a
//! [`StreamingSeries`] frame by frame, slides a [`TimeWindow`] over the X
//! domain, auto-scales Y, and renders each frame to a PNG via an offscreen
//! texture. This is the reference wiring of the core against the GPU
//! adapter; interactive hosts drive the same calls from their own frame
//! loop.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use crate::axes::{axis_vertices, frame_ticks, grid_vertices};
use crate::config::ChartConfig;
use crate::gpu::LineRenderer;
use crate::series::StreamingSeries;
use crate::time_window::TimeWindow;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a streamed chart to PNG frames
    Render {
        /// Input JSON file (array of y values); synthetic sine when omitted
        #[arg(long)]
        input: Option<PathBuf>,

        /// Output directory for frames
        #[arg(long)]
        out: PathBuf,

        /// Optional chart config JSON file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Frames per second
        #[arg(long, default_value_t = 60.0)]
        fps: f64,

        /// Duration in seconds (defaults to the input's duration)
        #[arg(long)]
        duration: Option<f64>,

        /// Input sample rate in Hz
        #[arg(long, default_value_t = 100.0)]
        sample_rate: f64,

        /// Retained-sample capacity (overrides config)
        #[arg(long)]
        capacity: Option<usize>,

        /// Sliding window length in milliseconds (overrides config)
        #[arg(long)]
        window_ms: Option<f64>,

        /// Output width (overrides config)
        #[arg(long)]
        width: Option<u32>,

        /// Output height (overrides config)
        #[arg(long)]
        height: Option<u32>,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            input,
            out,
            config,
            fps,
            duration,
            sample_rate,
            capacity,
            window_ms,
            width,
            height,
        } => {
            let mut chart_config = match config {
                Some(path) => ChartConfig::from_file(&path)?,
                None => ChartConfig::default(),
            };
            if let Some(capacity) = capacity {
                chart_config.capacity = capacity;
            }
            if let Some(window_ms) = window_ms {
                chart_config.window_ms = window_ms;
            }
            if let Some(width) = width {
                chart_config.width = width;
            }
            if let Some(height) = height {
                chart_config.height = height;
            }
            chart_config.validate()?;

            let samples = load_samples(input, duration, sample_rate)?;
            pollster::block_on(render_offline(
                chart_config,
                samples,
                out,
                fps,
                duration,
                sample_rate,
            ))?;
        }
    }
    Ok(())
}

/// Load input y values, or synthesize a sine sweep when no input is given.
fn load_samples(
    input: Option<PathBuf>,
    duration: Option<f64>,
    sample_rate: f64,
) -> Result<Vec<f64>> {
    match input {
        Some(path) => {
            let mut file = File::open(&path)?;
            let mut contents = String::new();
            file.read_to_string(&mut contents)?;
            let samples: Vec<f64> = serde_json::from_str(&contents)
                .or_else(|_| {
                    contents
                        .split_whitespace()
                        .map(|s| s.parse::<f64>())
                        .collect::<Result<Vec<_>, _>>()
                })
                .map_err(|_| {
                    anyhow::anyhow!(
                        "failed to parse input as a JSON array or whitespace-separated floats"
                    )
                })?;
            log::info!("loaded {} samples from {:?}", samples.len(), path);
            Ok(samples)
        }
        None => {
            let seconds = duration.unwrap_or(5.0);
            let n = (seconds * sample_rate).ceil() as usize;
            log::info!("no input given, synthesizing {} sine samples", n);
            Ok((0..n)
                .map(|i| {
                    let t = i as f64 / sample_rate;
                    (std::f64::consts::TAU * t).sin()
                })
                .collect())
        }
    }
}

async fn render_offline(
    config: ChartConfig,
    samples: Vec<f64>,
    out_dir: PathBuf,
    fps: f64,
    duration_limit: Option<f64>,
    sample_rate: f64,
) -> Result<()> {
    let width = config.width;
    let height = config.height;
    let input_duration = samples.len() as f64 / sample_rate;
    let render_duration = duration_limit.unwrap_or(input_duration);
    let total_frames = (render_duration * fps).ceil() as usize;
    let dt = 1.0 / fps;

    std::fs::create_dir_all(&out_dir)?;

    let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None, // Headless
            force_fallback_adapter: false,
        })
        .await
        .ok_or_else(|| anyhow::anyhow!("No adapter found"))?;

    let (device, queue) = adapter
        .request_device(&wgpu::DeviceDescriptor::default(), None)
        .await?;

    let texture_desc = wgpu::TextureDescriptor {
        label: Some("Target Texture"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    };
    let texture = device.create_texture(&texture_desc);
    let texture_view = texture.create_view(&wgpu::TextureViewDescriptor::default());

    // Readback buffer; rows padded to wgpu's copy alignment
    let u32_size = std::mem::size_of::<u32>() as u32;
    let unpadded_bytes_per_row = u32_size * width;
    let align = 256;
    let padded_bytes_per_row =
        unpadded_bytes_per_row + (align - unpadded_bytes_per_row % align) % align;
    let output_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Readback Buffer"),
        size: (padded_bytes_per_row * height) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut series = StreamingSeries::from_config(&config)?;
    let mut window = TimeWindow::new(config.window_ms, Some(0.0));
    let mut renderer = LineRenderer::new(
        &device,
        texture_desc.format,
        config.capacity,
        width,
        height,
        config.color,
    );

    log::info!(
        "rendering {} frames ({}x{}, capacity {}) to {:?}",
        total_frames,
        width,
        height,
        config.capacity,
        out_dir
    );

    let mut next_sample = 0usize;
    for frame_index in 0..total_frames {
        let t_seconds = frame_index as f64 * dt;
        let t_ms = t_seconds * 1_000.0;

        // Ingest every sample whose timestamp has passed
        while next_sample < samples.len() && next_sample as f64 / sample_rate <= t_seconds {
            let timestamp_ms = next_sample as f64 / sample_rate * 1_000.0;
            series.add_sample(timestamp_ms, samples[next_sample]);
            next_sample += 1;
        }

        // Slide the window, then re-project
        window.advance(Some(t_ms));
        let (start, end) = window.range();
        series.set_x_domain([start, end]);
        series.auto_scale_y(config.auto_scale_padding);
        let (positions, draw_count) = series.update();

        renderer.upload_series(&queue, positions, draw_count);
        let ticks = frame_ticks(series.frame(), 6, 5);
        let mut overlay = grid_vertices(series.frame(), &ticks);
        overlay.extend_from_slice(&axis_vertices(series.frame()));
        renderer.upload_grid(&queue, &overlay);

        let mut encoder =
            device.create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });
        renderer.render(&mut encoder, &texture_view);
        encoder.copy_texture_to_buffer(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::ImageCopyBuffer {
                buffer: &output_buffer,
                layout: wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_bytes_per_row),
                    rows_per_image: Some(height),
                },
            },
            texture_desc.size,
        );
        queue.submit(Some(encoder.finish()));

        // Map, unpad, and save the frame
        let buffer_slice = output_buffer.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |v| {
            let _ = tx.send(v);
        });
        device.poll(wgpu::Maintain::Wait);
        rx.recv()??;

        {
            let data = buffer_slice.get_mapped_range();
            let mut unpadded = Vec::with_capacity((width * height * 4) as usize);
            for row in 0..height {
                let start = (row * padded_bytes_per_row) as usize;
                let end = start + (width * 4) as usize;
                unpadded.extend_from_slice(&data[start..end]);
            }
            let frame_path = out_dir.join(format!("frame_{:05}.png", frame_index));
            image::save_buffer(&frame_path, &unpadded, width, height, image::ColorType::Rgba8)?;
        }
        output_buffer.unmap();
    }

    log::info!("done: {} frames", total_frames);
    Ok(())
}
