//! Image transform options for the `/api/transform/{id}` endpoint
//!
//! Query construction is pure and deterministic: the parameter order is
//! fixed (`w`, `h`, `fit`, `format`, `quality`, `blur`, `grayscale`,
//! `rotate`) and absent or falsy fields emit nothing at all, so the same
//! options always produce the same URL.

use std::fmt::Write;

/// Resize fit mode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFit {
    Cover,
    Contain,
    Fill,
    Inside,
    Outside,
}

impl ImageFit {
    /// Wire name used in the query string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cover => "cover",
            Self::Contain => "contain",
            Self::Fill => "fill",
            Self::Inside => "inside",
            Self::Outside => "outside",
        }
    }
}

/// Output image format
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    Webp,
    Jpeg,
    Png,
    Avif,
}

impl ImageFormat {
    /// Wire name used in the query string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Webp => "webp",
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Avif => "avif",
        }
    }
}

/// Transform parameters applied server-side when serving a file
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransformOptions {
    /// Target width in pixels (`w`)
    pub width: Option<u32>,
    /// Target height in pixels (`h`)
    pub height: Option<u32>,
    /// Resize fit mode
    pub fit: Option<ImageFit>,
    /// Output format
    pub format: Option<ImageFormat>,
    /// Quality, 1-100
    pub quality: Option<u8>,
    /// Blur radius
    pub blur: Option<u32>,
    /// Convert to grayscale; `false` emits no parameter
    pub grayscale: bool,
    /// Rotation in degrees
    pub rotate: Option<i32>,
}

impl TransformOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set target width
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    /// Set target height
    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// Set fit mode
    pub fn with_fit(mut self, fit: ImageFit) -> Self {
        self.fit = Some(fit);
        self
    }

    /// Set output format
    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Set quality (1-100)
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = Some(quality);
        self
    }

    /// Set blur radius
    pub fn with_blur(mut self, blur: u32) -> Self {
        self.blur = Some(blur);
        self
    }

    /// Enable grayscale
    pub fn grayscale(mut self) -> Self {
        self.grayscale = true;
        self
    }

    /// Set rotation in degrees
    pub fn with_rotate(mut self, degrees: i32) -> Self {
        self.rotate = Some(degrees);
        self
    }

    /// Render the query string, without the leading `?`.
    ///
    /// Returns `None` when every field is absent so callers can skip the
    /// `?` entirely.
    pub fn to_query(&self) -> Option<String> {
        let mut query = String::new();

        let mut push = |key: &str, value: &str| {
            if !query.is_empty() {
                query.push('&');
            }
            let _ = write!(query, "{}={}", key, value);
        };

        // Zero is treated as absent, same as the grayscale=false rule.
        if let Some(width) = self.width.filter(|w| *w > 0) {
            push("w", &width.to_string());
        }
        if let Some(height) = self.height.filter(|h| *h > 0) {
            push("h", &height.to_string());
        }
        if let Some(fit) = self.fit {
            push("fit", fit.as_str());
        }
        if let Some(format) = self.format {
            push("format", format.as_str());
        }
        if let Some(quality) = self.quality.filter(|q| *q > 0) {
            push("quality", &quality.to_string());
        }
        if let Some(blur) = self.blur.filter(|b| *b > 0) {
            push("blur", &blur.to_string());
        }
        if self.grayscale {
            push("grayscale", "true");
        }
        if let Some(rotate) = self.rotate.filter(|r| *r != 0) {
            push("rotate", &rotate.to_string());
        }

        if query.is_empty() {
            None
        } else {
            Some(query)
        }
    }
}
