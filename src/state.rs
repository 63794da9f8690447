use crate::{
    acquire::{extract_palette_from, Fetcher, ImageSource},
    error::AcquireError,
    PaletteEntry, DEFAULT_COLOR_COUNT,
};

/// The lifecycle of one palette request, for frontends that render loading, error and data states.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ExtractionState {
    #[default]
    Idle,
    Pending,
    Settled(Result<Vec<PaletteEntry>, String>),
}

impl ExtractionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ExtractionState::Pending)
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, ExtractionState::Settled(_))
    }

    pub fn palette(&self) -> Option<&[PaletteEntry]> {
        match self {
            ExtractionState::Settled(Ok(entries)) => Some(entries),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ExtractionState::Settled(Err(message)) => Some(message),
            _ => None,
        }
    }
}

/// Drives an [`ExtractionState`] through one extraction at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteTask {
    color_count: usize,
    state: ExtractionState,
}

impl PaletteTask {
    pub fn new(color_count: usize) -> Self {
        Self {
            color_count,
            state: ExtractionState::Idle,
        }
    }

    pub fn state(&self) -> &ExtractionState {
        &self.state
    }

    pub fn color_count(&self) -> usize {
        self.color_count
    }

    /// Mark a request as started. Any previous result is discarded.
    pub fn begin(&mut self) {
        self.state = ExtractionState::Pending;
    }

    pub fn settle(&mut self, result: Result<Vec<PaletteEntry>, AcquireError>) {
        self.state = ExtractionState::Settled(result.map_err(|e| e.to_string()));
    }

    pub fn reset(&mut self) {
        self.state = ExtractionState::Idle;
    }

    /// Extract a palette from the source, moving through pending to settled.
    pub async fn run<F>(&mut self, source: ImageSource, fetcher: &F) -> &ExtractionState
    where
        F: Fetcher,
    {
        self.begin();
        let result = extract_palette_from(source, fetcher, self.color_count).await;
        self.settle(result);

        &self.state
    }
}

impl Default for PaletteTask {
    fn default() -> Self {
        Self::new(DEFAULT_COLOR_COUNT)
    }
}
