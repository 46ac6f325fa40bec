use crate::view_model::{AppViewModel, ScreenView};

pub type AttemptId = u64;

pub const SLIDE_COUNT_MIN: u8 = 3;
pub const SLIDE_COUNT_MAX: u8 = 20;
pub const SLIDE_COUNT_DEFAULT: u8 = 5;

/// Clamp a requested slide count into the supported range.
pub fn clamp_slide_count(count: i64) -> u8 {
    count.clamp(i64::from(SLIDE_COUNT_MIN), i64::from(SLIDE_COUNT_MAX)) as u8
}

/// Parse a raw slide-count input, falling back to the default when it is not
/// a number, then clamp into range.
pub fn slide_count_from_input(raw: &str) -> u8 {
    raw.trim()
        .parse::<i64>()
        .map(clamp_slide_count)
        .unwrap_or(SLIDE_COUNT_DEFAULT)
}

/// A validated request: the topic is trimmed and non-empty, the slide count
/// is inside the supported range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    topic: String,
    slides: u8,
}

impl GenerationRequest {
    pub fn new(topic: &str, slides: u8) -> Option<Self> {
        let topic = topic.trim();
        if topic.is_empty() {
            return None;
        }
        Some(Self {
            topic: topic.to_string(),
            slides: clamp_slide_count(i64::from(slides)),
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn slides(&self) -> u8 {
        self.slides
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactInfo {
    pub filename: String,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationFailure {
    pub kind: ErrorKind,
    /// Transport-level detail for the log; the user sees only the
    /// notification literal for `kind`.
    pub detail: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Timeout,
    Server,
    NetworkUnreachable,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Generating,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryMode {
    #[default]
    Immediate,
    Deferred,
}

/// Navigation-state object carried to the delivery screen. Loosely typed on
/// purpose: the mount guard decides whether it is usable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Handoff {
    pub file_ref: Option<AttemptId>,
    pub filename: Option<String>,
    pub topic: Option<String>,
    pub slide_count: Option<u8>,
}

impl Handoff {
    pub fn complete(file_ref: AttemptId, filename: String, topic: String, slide_count: u8) -> Self {
        Self {
            file_ref: Some(file_ref),
            filename: Some(filename),
            topic: Some(topic),
            slide_count: Some(slide_count),
        }
    }

    /// Usable for delivery: the payload reference and filename are present.
    pub fn is_complete(&self) -> bool {
        self.file_ref.is_some() && self.filename.is_some()
    }
}

/// The delivery screen once its hand-off passed the mount guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryScreen {
    pub file_ref: AttemptId,
    pub filename: String,
    pub topic: String,
    pub slide_count: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Generator,
    Delivery(DeliveryScreen),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    topic: String,
    slide_count: u8,
    phase: Phase,
    in_flight: Option<AttemptId>,
    route: Route,
    delivery_mode: DeliveryMode,
    next_attempt: AttemptId,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            topic: String::new(),
            slide_count: SLIDE_COUNT_DEFAULT,
            phase: Phase::Idle,
            in_flight: None,
            route: Route::Generator,
            delivery_mode: DeliveryMode::Immediate,
            next_attempt: 1,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delivery_mode(mode: DeliveryMode) -> Self {
        Self {
            delivery_mode: mode,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        let screen = match &self.route {
            Route::Generator => ScreenView::Generator {
                topic: self.topic.clone(),
                slide_count: self.slide_count,
                generating: self.phase == Phase::Generating,
            },
            Route::Delivery(screen) => ScreenView::Delivery {
                filename: screen.filename.clone(),
                topic: screen.topic.clone(),
                slide_count: screen.slide_count,
            },
        };
        AppViewModel {
            phase: self.phase,
            screen,
        }
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn topic(&self) -> &str {
        &self.topic
    }

    pub(crate) fn slide_count(&self) -> u8 {
        self.slide_count
    }

    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn route(&self) -> &Route {
        &self.route
    }

    pub(crate) fn delivery_mode(&self) -> DeliveryMode {
        self.delivery_mode
    }

    pub(crate) fn in_flight(&self) -> Option<AttemptId> {
        self.in_flight
    }

    pub(crate) fn set_topic(&mut self, topic: String) {
        if self.topic != topic {
            self.topic = topic;
            self.dirty = true;
        }
    }

    pub(crate) fn set_slide_count(&mut self, count: u8) {
        if self.slide_count != count {
            self.slide_count = count;
            self.dirty = true;
        }
    }

    /// Idle -> Generating; allocates the attempt id carried by the request.
    pub(crate) fn begin_attempt(&mut self) -> AttemptId {
        let attempt = self.next_attempt;
        self.next_attempt += 1;
        self.in_flight = Some(attempt);
        self.phase = Phase::Generating;
        self.dirty = true;
        attempt
    }

    /// Generating -> `phase`; the attempt is no longer in flight.
    pub(crate) fn finish_attempt(&mut self, phase: Phase) {
        self.in_flight = None;
        self.phase = phase;
        self.dirty = true;
    }

    /// Clear the form back to its initial values after a successful attempt.
    pub(crate) fn reset_inputs(&mut self) {
        self.topic.clear();
        self.slide_count = SLIDE_COUNT_DEFAULT;
        self.dirty = true;
    }

    pub(crate) fn open_delivery(&mut self, screen: DeliveryScreen) {
        self.route = Route::Delivery(screen);
        self.dirty = true;
    }

    /// Back to the entry screen; also leaves any terminal phase.
    pub(crate) fn close_delivery(&mut self) {
        self.route = Route::Generator;
        if self.phase == Phase::Done {
            self.phase = Phase::Idle;
        }
        self.dirty = true;
    }
}
