use std::sync::Arc;

use crate::error::{MinimapError, MinimapResult};
use crate::render::{DrawingSurface, LinePrimitive, PolylinePrimitive, RectPrimitive};

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    RoundedClip(RectPrimitive),
    FillRect(RectPrimitive),
    Line(LinePrimitive),
    Polyline(PolylinePrimitive),
    /// Snapshot of another surface composited at `(x, y)`.
    Composite {
        x: f64,
        y: f64,
        commands: Arc<[DrawCommand]>,
    },
}

/// Headless surface that records validated draw commands.
///
/// Used by tests and by hosts that replay the command list on their own
/// backend. `clear` drops everything recorded so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
    save_depth: usize,
    clear_count: u64,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> MinimapResult<Self> {
        validate_size(width, height)?;
        Ok(Self {
            width,
            height,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    #[must_use]
    pub fn clear_count(&self) -> u64 {
        self.clear_count
    }

    #[must_use]
    pub fn filled_rects(&self) -> Vec<RectPrimitive> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::FillRect(rect) => Some(*rect),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn lines(&self) -> Vec<LinePrimitive> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Line(line) => Some(*line),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn composites(&self) -> Vec<(f64, f64, Arc<[DrawCommand]>)> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Composite { x, y, commands } => Some((*x, *y, Arc::clone(commands))),
                _ => None,
            })
            .collect()
    }
}

impl DrawingSurface for RecordingSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn create_offscreen(&self, width: f64, height: f64) -> MinimapResult<Self> {
        Self::new(width, height)
    }

    fn resize(&mut self, width: f64, height: f64) -> MinimapResult<()> {
        validate_size(width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    fn clear(&mut self) -> MinimapResult<()> {
        self.commands.clear();
        self.save_depth = 0;
        self.clear_count = self.clear_count.saturating_add(1);
        Ok(())
    }

    fn save(&mut self) -> MinimapResult<()> {
        self.save_depth += 1;
        self.commands.push(DrawCommand::Save);
        Ok(())
    }

    fn restore(&mut self) -> MinimapResult<()> {
        if self.save_depth == 0 {
            return Err(MinimapError::InvalidData(
                "restore without matching save".to_owned(),
            ));
        }
        self.save_depth -= 1;
        self.commands.push(DrawCommand::Restore);
        Ok(())
    }

    fn set_rounded_clip(&mut self, rect: RectPrimitive) -> MinimapResult<()> {
        rect.validate()?;
        self.commands.push(DrawCommand::RoundedClip(rect));
        Ok(())
    }

    fn fill_rect(&mut self, rect: RectPrimitive) -> MinimapResult<()> {
        rect.validate()?;
        self.commands.push(DrawCommand::FillRect(rect));
        Ok(())
    }

    fn stroke_line(&mut self, line: LinePrimitive) -> MinimapResult<()> {
        line.validate()?;
        self.commands.push(DrawCommand::Line(line));
        Ok(())
    }

    fn stroke_polyline(&mut self, polyline: &PolylinePrimitive) -> MinimapResult<()> {
        polyline.validate()?;
        self.commands.push(DrawCommand::Polyline(polyline.clone()));
        Ok(())
    }

    fn draw_surface(&mut self, source: &Self, x: f64, y: f64) -> MinimapResult<()> {
        if !x.is_finite() || !y.is_finite() {
            return Err(MinimapError::InvalidData(
                "composite offset must be finite".to_owned(),
            ));
        }
        self.commands.push(DrawCommand::Composite {
            x,
            y,
            commands: Arc::from(source.commands.as_slice()),
        });
        Ok(())
    }
}

fn validate_size(width: f64, height: f64) -> MinimapResult<()> {
    if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
        return Err(MinimapError::InvalidData(format!(
            "surface size must be finite and >= 0 (got {width}x{height})"
        )));
    }
    Ok(())
}
