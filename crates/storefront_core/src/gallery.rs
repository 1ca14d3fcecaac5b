use shared::domain::Product;

/// Image navigation for a product-detail screen.
///
/// With no images the session is inert: every transition returns `None`.
/// Transitions return the newly displayed image so the renderer can drive its
/// own cross-fade; the session keeps no timing state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GallerySession {
    images: Vec<String>,
    current: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thumbnail<'a> {
    pub index: usize,
    pub image: &'a str,
    pub active: bool,
}

impl GallerySession {
    pub fn new(images: Vec<String>) -> Self {
        Self { images, current: 0 }
    }

    pub fn for_product(product: &Product) -> Self {
        Self::new(product.images.clone())
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn index(&self) -> Option<usize> {
        (!self.is_empty()).then_some(self.current)
    }

    pub fn current(&self) -> Option<&str> {
        self.images.get(self.current).map(String::as_str)
    }

    /// Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> Option<&str> {
        if index >= self.images.len() {
            return None;
        }
        self.current = index;
        self.current()
    }

    pub fn next(&mut self) -> Option<&str> {
        if self.is_empty() {
            return None;
        }
        self.current = (self.current + 1) % self.images.len();
        self.current()
    }

    pub fn previous(&mut self) -> Option<&str> {
        if self.is_empty() {
            return None;
        }
        let len = self.images.len();
        self.current = (self.current + len - 1) % len;
        self.current()
    }

    pub fn thumbnails(&self) -> impl Iterator<Item = Thumbnail<'_>> + '_ {
        self.images.iter().enumerate().map(|(index, image)| Thumbnail {
            index,
            image,
            active: index == self.current,
        })
    }
}
