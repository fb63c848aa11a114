//! Per-element activation state for slides and indicators.

/// Display state of a single slide or indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activation {
    /// Shown (slide) or highlighted (indicator).
    Active,
    /// Hidden (slide) or dimmed (indicator).
    #[default]
    Inactive,
}

impl Activation {
    pub fn is_active(self) -> bool {
        self == Activation::Active
    }
}

/// One unit of carousel content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    title: String,
    image: Option<String>,
    activation: Activation,
}

impl Slide {
    /// Create an inactive slide with a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            image: None,
            activation: Activation::Inactive,
        }
    }

    /// Create an inactive slide with a title and an image reference.
    pub fn with_image(title: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            image: Some(image.into()),
            activation: Activation::Inactive,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn is_active(&self) -> bool {
        self.activation.is_active()
    }

    pub(crate) fn set_activation(&mut self, activation: Activation) {
        self.activation = activation;
    }
}

/// Clickable control pointing at one slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indicator {
    slide_to: usize,
    activation: Activation,
}

impl Indicator {
    pub(crate) fn new(slide_to: usize) -> Self {
        Self {
            slide_to,
            activation: Activation::Inactive,
        }
    }

    /// Index of the slide this indicator jumps to.
    pub fn slide_to(&self) -> usize {
        self.slide_to
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// Whether this indicator is the highlighted one.
    pub fn is_highlighted(&self) -> bool {
        self.activation.is_active()
    }

    pub(crate) fn set_activation(&mut self, activation: Activation) {
        self.activation = activation;
    }
}
