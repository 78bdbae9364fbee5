// crates/subzone-core/src/frame.rs
//
// Decoded video frame as handed from VideoSession to the compositor.
// Packed BGR24 (no stride padding), the capture's native channel order.
// The compositor converts to RGBA only at the very end, for display.

/// Bytes per BGR24 pixel.
pub const BGR_BPP: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub width:  u32,
    pub height: u32,
    /// `width * height * 3` bytes, row-major, B G R per pixel.
    pub data:   Vec<u8>,
}

impl Frame {
    /// A solid-black frame.
    pub fn black(width: u32, height: u32) -> Self {
        Self { width, height, data: vec![0; width as usize * height as usize * BGR_BPP] }
    }

    /// Wrap an already-packed BGR24 buffer. Returns None when the length does
    /// not match the dimensions.
    pub fn from_bgr(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        (data.len() == width as usize * height as usize * BGR_BPP)
            .then_some(Self { width, height, data })
    }

    pub fn is_empty(&self) -> bool { self.width == 0 || self.height == 0 }

    /// Byte offset of pixel `(x, y)`.
    #[inline]
    pub fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * BGR_BPP
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let o = self.offset(x, y);
        [self.data[o], self.data[o + 1], self.data[o + 2]]
    }
}

/// Display-ready RGBA image, e.g. for an egui `ColorImage`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayImage {
    pub width:  u32,
    pub height: u32,
    pub rgba:   Vec<u8>,
}
