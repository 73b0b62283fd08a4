use utility::geo::Coordinate;

/// Screen space offset in pixels, relative to the anchor coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelOffset {
    pub x: i32,
    pub y: i32,
}

impl PixelOffset {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A text label. Free labels carry their own position, labels attached to a
/// marker follow the marker and are drawn at `offset` from it.
#[derive(Debug, Clone, PartialEq)]
pub struct MapLabel {
    text: String,
    position: Option<Coordinate>,
    offset: PixelOffset,
    visible: bool,
    css_class: Option<String>,
}

impl MapLabel {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self::with_offset(text, 0, 0)
    }

    pub fn with_offset<S: Into<String>>(text: S, x: i32, y: i32) -> Self {
        Self {
            text: text.into(),
            position: None,
            offset: PixelOffset::new(x, y),
            visible: false,
            css_class: None,
        }
    }

    pub fn at(mut self, position: Coordinate) -> Self {
        self.position = Some(position);
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn css_class<S: Into<String>>(mut self, css_class: S) -> Self {
        self.css_class = Some(css_class.into());
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> Option<Coordinate> {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: Option<Coordinate>) {
        self.position = position;
    }

    pub fn offset(&self) -> PixelOffset {
        self.offset
    }

    pub fn style_class(&self) -> Option<&str> {
        self.css_class.as_deref()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) -> bool {
        let changed = self.visible != visible;
        self.visible = visible;
        changed
    }
}
