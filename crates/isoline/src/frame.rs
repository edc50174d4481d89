//! Per-frame driver: advance time, resample, re-extract, present.
//!
//! The driver is single-threaded and synchronous. Every frame rebuilds the
//! sampled grid and the contour from scratch; only the triangle topology
//! survives between frames.

use std::time::{Duration, Instant};

use field_common::{FieldConfig, FieldResult, GridPoint};
use tracing::{debug, info};

use crate::color::ColorBands;
use crate::contour::{extract_contour_from_values, ContourGeometry};
use crate::field::ScalarField;
use crate::sampler::{FieldSampler, SampledGrid};
use crate::topology::GridTopology;

/// Accumulated animation time in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    time: f32,
}

impl FrameClock {
    pub fn new(start: f32) -> Self {
        Self { time: start }
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Advance by `dt` seconds. Negative or non-finite deltas are ignored.
    pub fn advance(&mut self, dt: f32) -> f32 {
        if dt.is_finite() && dt > 0.0 {
            self.time += dt;
        }
        self.time
    }
}

/// What the windowing collaborator reports each iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformTick {
    /// Seconds since the previous frame
    pub frame_delta: f32,
    pub quit_requested: bool,
}

/// Source of frame timing and the quit signal.
pub trait FramePlatform {
    fn poll(&mut self) -> PlatformTick;
}

/// Consumer of the drawable buffers produced each frame.
pub trait FrameSink {
    fn present(&mut self, buffers: &FrameBuffers<'_>) -> FieldResult<()>;
}

/// Primitive assembly for an index buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    /// Filled triangles, three indices each
    Triangles,
    /// Independent line segments, two indices each
    Lines,
}

/// Borrowed view of both drawable buffer pairs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameBuffers<'a> {
    pub frame_index: u64,
    pub time: f32,
    pub grid_points: &'a [GridPoint],
    pub grid_indices: &'a [u32],
    pub contour_vertices: &'a [[f32; 2]],
    pub contour_indices: &'a [u32],
}

impl<'a> FrameBuffers<'a> {
    pub const GRID_MODE: DrawMode = DrawMode::Triangles;
    pub const CONTOUR_MODE: DrawMode = DrawMode::Lines;

    pub fn grid_vertex_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.grid_points)
    }

    pub fn grid_index_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.grid_indices)
    }

    pub fn contour_vertex_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.contour_vertices)
    }

    pub fn contour_index_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.contour_indices)
    }
}

/// Everything computed for a single frame.
#[derive(Debug, Clone)]
pub struct Frame {
    pub index: u64,
    pub time: f32,
    pub grid: SampledGrid,
    pub contour: ContourGeometry,
}

impl Frame {
    /// Borrow the frame's buffers alongside the shared grid topology.
    pub fn buffers<'a>(&'a self, topology: &'a GridTopology) -> FrameBuffers<'a> {
        FrameBuffers {
            frame_index: self.index,
            time: self.time,
            grid_points: &self.grid.points,
            grid_indices: topology.indices(),
            contour_vertices: &self.contour.vertices,
            contour_indices: &self.contour.indices,
        }
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunStats {
    pub frames: u64,
    pub final_time: f32,
    pub max_contour_vertices: usize,
    pub total_segments: u64,
    pub elapsed: Duration,
}

/// Owns the time-invariant state and produces frames on demand.
pub struct FrameDriver<F> {
    config: FieldConfig,
    sampler: FieldSampler,
    topology: GridTopology,
    field: F,
    clock: FrameClock,
    frames: u64,
}

impl<F: ScalarField> FrameDriver<F> {
    /// Validate `config` and build the grid topology once.
    pub fn new(config: FieldConfig, field: F) -> FieldResult<Self> {
        config.validate()?;

        let grid = config.grid();
        let sampler = FieldSampler::new(grid, ColorBands::from_config(&config));
        let topology = GridTopology::build(grid);

        Ok(Self {
            config,
            sampler,
            topology,
            field,
            clock: FrameClock::default(),
            frames: 0,
        })
    }

    /// Start the animation clock at `start` seconds instead of zero.
    pub fn with_start_time(mut self, start: f32) -> Self {
        self.clock = FrameClock::new(start);
        self
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn topology(&self) -> &GridTopology {
        &self.topology
    }

    pub fn time(&self) -> f32 {
        self.clock.time()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    /// Advance time by `dt` and compute a fresh frame.
    pub fn step(&mut self, dt: f32) -> FieldResult<Frame> {
        let time = self.clock.advance(dt);
        let frame = self.compute(time)?;
        self.frames += 1;
        Ok(frame)
    }

    /// Compute the frame at an absolute `time` without touching the clock.
    pub fn compute(&self, time: f32) -> FieldResult<Frame> {
        let grid = self.sampler.sample(&self.field, time);
        let contour = extract_contour_from_values(
            &grid.points,
            &grid.values,
            &self.topology,
            self.config.threshold,
        )?;

        debug!(
            frame = self.frames,
            time,
            contour_vertices = contour.vertices.len(),
            segments = contour.segment_count(),
            "Computed frame"
        );

        Ok(Frame {
            index: self.frames,
            time,
            grid,
            contour,
        })
    }

    /// Poll, step and present until the platform requests quit.
    pub fn run<P, S>(&mut self, platform: &mut P, sink: &mut S) -> FieldResult<RunStats>
    where
        P: FramePlatform + ?Sized,
        S: FrameSink + ?Sized,
    {
        let started = Instant::now();
        let mut stats = RunStats::default();

        info!(
            width = self.config.grid_width,
            height = self.config.grid_height,
            threshold = self.config.threshold,
            "Starting frame loop"
        );

        loop {
            let tick = platform.poll();
            if tick.quit_requested {
                break;
            }

            let frame = self.step(tick.frame_delta)?;
            sink.present(&frame.buffers(&self.topology))?;

            stats.frames += 1;
            stats.max_contour_vertices =
                stats.max_contour_vertices.max(frame.contour.vertices.len());
            stats.total_segments += frame.contour.segment_count() as u64;
        }

        stats.final_time = self.clock.time();
        stats.elapsed = started.elapsed();

        info!(
            frames = stats.frames,
            final_time = stats.final_time,
            max_contour_vertices = stats.max_contour_vertices,
            total_segments = stats.total_segments,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "Frame loop finished"
        );

        Ok(stats)
    }
}
