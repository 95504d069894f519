use anyhow::{Context, Result};
use image::DynamicImage;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

/// Region of the source image, in source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Values steps attach to a frame for later steps to read.
#[derive(Debug, Clone, PartialEq)]
pub enum Attr {
    Bool(bool),
    Float(f32),
    Int(u32),
}

/// One unit of work flowing between steps: the whole scene at first, then
/// one frame per candidate region once contours have been split out.
#[derive(Clone)]
pub struct Frame {
    pub image: DynamicImage,

    /// Untouched input scene, shared by every frame derived from it.
    pub source: Arc<DynamicImage>,

    /// None while the frame still covers the whole scene.
    pub bbox: Option<BoundingBox>,

    pub attrs: HashMap<String, Attr>,
}

impl Frame {
    pub fn from_scene(image: DynamicImage) -> Self {
        let source = Arc::new(image.clone());
        Self {
            image,
            source,
            bbox: None,
            attrs: HashMap::new(),
        }
    }

    pub fn from_region(image: DynamicImage, source: Arc<DynamicImage>, bbox: BoundingBox) -> Self {
        Self {
            image,
            source,
            bbox: Some(bbox),
            attrs: HashMap::new(),
        }
    }

    /// Same region and attributes, new pixels.
    pub fn with_image(&self, image: DynamicImage) -> Self {
        Self {
            image,
            source: self.source.clone(),
            bbox: self.bbox,
            attrs: self.attrs.clone(),
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: Attr) {
        self.attrs.insert(key.into(), value);
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.attrs.get(key) {
            Some(Attr::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_float(&self, key: &str) -> Option<f32> {
        match self.attrs.get(key) {
            Some(Attr::Float(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_int(&self, key: &str) -> Option<u32> {
        match self.attrs.get(key) {
            Some(Attr::Int(v)) => Some(*v),
            _ => None,
        }
    }
}

/// Shared by every step in a run.
#[derive(Clone, Debug, Default)]
pub struct PipelineContext {
    /// Where intermediate images go, if anywhere.
    pub debug_dir: Option<PathBuf>,
}

/// A stage of the detector. Steps may split one frame into many, drop
/// frames, or rewrite them in place.
pub trait PipelineStep: Send + Sync {
    fn process(&self, frames: Vec<Frame>, context: &PipelineContext) -> Result<Vec<Frame>>;

    fn name(&self) -> &str;
}

fn step_dir_name(index: usize, name: &str) -> String {
    format!("{:02}_{}", index, name.to_lowercase().replace(' ', "_"))
}

fn save_debug_image(dir: &Path, filename: &str, image: &DynamicImage) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create debug directory {}", dir.display()))?;
    let path = dir.join(filename);
    image
        .save(&path)
        .with_context(|| format!("Failed to save debug image {}", path.display()))?;
    tracing::trace!(path = %path.display(), "Saved debug image");
    Ok(())
}

/// Frame plus the steps still ahead of it.
#[derive(Clone)]
pub struct WorkItem {
    pub frame: Frame,
    pub remaining: Vec<Arc<dyn PipelineStep>>,
    /// Number of steps already applied.
    pub depth: usize,
    /// 1-based position of this item among its siblings at each depth,
    /// e.g. [1, 3] is the third region split from the first scene.
    pub lineage: Vec<usize>,
}

impl WorkItem {
    pub fn new(frame: Frame, steps: Vec<Arc<dyn PipelineStep>>) -> Self {
        Self {
            frame,
            remaining: steps,
            depth: 0,
            lineage: vec![],
        }
    }

    pub fn is_complete(&self) -> bool {
        self.remaining.is_empty()
    }

    /// `01-03-02.png` style name derived from the lineage.
    pub fn lineage_filename(&self, extension: &str) -> String {
        if self.lineage.is_empty() {
            return format!("01.{}", extension);
        }
        let ids: Vec<String> = self.lineage.iter().map(|id| format!("{:02}", id)).collect();
        format!("{}.{}", ids.join("-"), extension)
    }

    /// Apply the next step, producing zero or more successor items.
    pub fn advance(&self, context: &PipelineContext) -> Result<Vec<WorkItem>> {
        let Some((step, rest)) = self.remaining.split_first() else {
            return Ok(vec![]);
        };

        let outputs = step
            .process(vec![self.frame.clone()], context)
            .with_context(|| format!("Step '{}' failed", step.name()))?;

        let mut next = Vec::with_capacity(outputs.len());
        for (idx, frame) in outputs.into_iter().enumerate() {
            let mut lineage = self.lineage.clone();
            lineage.push(idx + 1);

            let item = WorkItem {
                frame,
                remaining: rest.to_vec(),
                depth: self.depth + 1,
                lineage,
            };

            if let Some(dir) = &context.debug_dir {
                let step_dir = dir.join(step_dir_name(item.depth, step.name()));
                save_debug_image(&step_dir, &item.lineage_filename("png"), &item.frame.image)?;
            }

            next.push(item);
        }

        Ok(next)
    }
}

/// Drains a work queue until every item has run out of steps.
pub struct PipelineExecutor {
    sender: Sender<WorkItem>,
    receiver: Receiver<WorkItem>,
    context: PipelineContext,
}

impl PipelineExecutor {
    pub fn new(context: PipelineContext) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            context,
        }
    }

    pub fn execute(&self, initial: Vec<WorkItem>) -> Result<Vec<Frame>> {
        let mut pending = 0usize;
        for item in initial {
            self.sender
                .send(item)
                .map_err(|e| anyhow::anyhow!("Failed to queue work item: {}", e))?;
            pending += 1;
        }

        let mut finished = Vec::new();

        while pending > 0 {
            let item = match self.receiver.try_recv() {
                Ok(item) => item,
                Err(mpsc::TryRecvError::Empty) => {
                    std::thread::yield_now();
                    continue;
                }
                Err(mpsc::TryRecvError::Disconnected) => break,
            };
            pending -= 1;

            if item.is_complete() {
                finished.push(item.frame);
                continue;
            }

            for next in item.advance(&self.context)? {
                self.sender
                    .send(next)
                    .map_err(|e| anyhow::anyhow!("Failed to queue work item: {}", e))?;
                pending += 1;
            }
        }

        Ok(finished)
    }
}

/// Ordered list of steps plus the context they run under.
#[derive(Clone, Default)]
pub struct Pipeline {
    steps: Vec<Arc<dyn PipelineStep>>,
    context: PipelineContext,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write every intermediate frame under `output_dir`, which must be
    /// empty or not exist yet.
    pub fn with_debug(mut self, output_dir: PathBuf) -> Result<Self> {
        if output_dir.exists() {
            let mut entries = std::fs::read_dir(&output_dir)?;
            if entries.next().is_some() {
                anyhow::bail!("Debug directory is not empty: {}", output_dir.display());
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }

        self.context.debug_dir = Some(output_dir);
        Ok(self)
    }

    pub fn add_step(mut self, step: Arc<dyn PipelineStep>) -> Self {
        self.steps.push(step);
        self
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    fn save_input(&self, input: &DynamicImage) -> Result<()> {
        if let Some(dir) = &self.context.debug_dir {
            save_debug_image(&dir.join("00_input"), "01.png", input)?;
        }
        Ok(())
    }

    /// Run every step over the whole batch before moving to the next.
    pub fn run(&self, input: DynamicImage) -> Result<Vec<Frame>> {
        self.run_partial(input, self.steps.len())
    }

    /// Like [`Pipeline::run`] but stops after `num_steps` steps.
    pub fn run_partial(&self, input: DynamicImage, num_steps: usize) -> Result<Vec<Frame>> {
        self.save_input(&input)?;
        let mut frames = vec![Frame::from_scene(input)];

        for (idx, step) in self.steps.iter().take(num_steps).enumerate() {
            tracing::debug!(step = step.name(), frames = frames.len(), "Running step");
            frames = step
                .process(frames, &self.context)
                .with_context(|| format!("Step '{}' failed", step.name()))?;

            if let Some(dir) = &self.context.debug_dir {
                let step_dir = dir.join(step_dir_name(idx + 1, step.name()));
                for (i, frame) in frames.iter().enumerate() {
                    save_debug_image(&step_dir, &format!("{:02}.png", i + 1), &frame.image)?;
                }
            }

            tracing::debug!(step = step.name(), frames = frames.len(), "Step finished");
        }

        Ok(frames)
    }

    /// Run item-by-item through the work queue; debug output is named by
    /// lineage instead of batch position.
    pub fn run_with_executor(&self, input: DynamicImage) -> Result<Vec<Frame>> {
        self.save_input(&input)?;
        let item = WorkItem::new(Frame::from_scene(input), self.steps.clone());
        PipelineExecutor::new(self.context.clone()).execute(vec![item])
    }
}
