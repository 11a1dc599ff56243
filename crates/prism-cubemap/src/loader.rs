use crate::face::{CubeFace, FaceBuffer};

/// Progress shown to the user.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoadStatus {
    Loading { loaded: usize },
    Failed,
    Ready,
}

impl LoadStatus {
    pub fn message(self) -> &'static str {
        match self {
            LoadStatus::Failed => "LOAD FAILED!",
            LoadStatus::Loading { .. } => "LOADING ...",
            LoadStatus::Ready => "LMB + move mouse to look around",
        }
    }
}

/// Collects decoded faces into one staging buffer.
///
/// The staging buffer is handed out exactly once, when the sixth distinct
/// face has been decoded. Any failure is sticky: later faces are ignored and
/// no buffer is ever produced.
pub struct CubemapLoader {
    face_size: u32,
    staging: Option<FaceBuffer>,
    loaded: [bool; CubeFace::COUNT],
    load_count: usize,
    failed: bool,
}

impl CubemapLoader {
    pub fn new(face_size: u32) -> Self {
        Self {
            face_size,
            staging: Some(FaceBuffer::new(face_size)),
            loaded: [false; CubeFace::COUNT],
            load_count: 0,
            failed: false,
        }
    }

    pub fn face_size(&self) -> u32 {
        self.face_size
    }

    pub fn load_count(&self) -> usize {
        self.load_count
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }

    pub fn status(&self) -> LoadStatus {
        if self.failed {
            LoadStatus::Failed
        } else if self.load_count < CubeFace::COUNT {
            LoadStatus::Loading { loaded: self.load_count }
        } else {
            LoadStatus::Ready
        }
    }

    /// Decodes `compressed` into `face`'s slot.
    ///
    /// Returns the complete staging buffer when this was the last missing
    /// face. An undecodable image marks the load as failed.
    ///
    /// # Panics
    ///
    /// If the decoded image is not `face_size`×`face_size`.
    pub fn on_fetched(&mut self, face: CubeFace, compressed: &[u8]) -> Option<FaceBuffer> {
        if self.failed {
            return None;
        }
        if self.loaded[face.index()] {
            log::warn!("face {face} delivered twice; ignoring");
            return None;
        }

        let decoded = match image::load_from_memory(compressed) {
            Ok(img) => img.to_rgba8(),
            Err(err) => {
                log::error!("face {face}: decode failed: {err}");
                self.mark_failed();
                return None;
            }
        };

        assert_eq!(
            decoded.dimensions(),
            (self.face_size, self.face_size),
            "face {face} has unexpected dimensions"
        );

        let staging = self.staging.as_mut()?;
        staging.face_mut(face).copy_from_slice(decoded.as_raw());

        self.loaded[face.index()] = true;
        self.load_count += 1;
        log::debug!("face {face} decoded ({}/{})", self.load_count, CubeFace::COUNT);

        if self.load_count == CubeFace::COUNT {
            self.staging.take()
        } else {
            None
        }
    }

    pub fn on_failed(&mut self, face: CubeFace) {
        log::error!("face {face}: fetch failed");
        self.mark_failed();
    }

    /// Sets the sticky failure flag and releases the staging memory.
    pub fn mark_failed(&mut self) {
        self.failed = true;
        self.staging = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

    const SIZE: u32 = 4;

    fn jpeg(size: u32, shade: u8) -> Vec<u8> {
        let img = RgbImage::from_pixel(size, size, Rgb([shade, shade, shade]));
        let mut out = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut out), ImageFormat::Jpeg)
            .unwrap();
        out
    }

    // ── success path ──────────────────────────────────────────────────────

    #[test]
    fn buffer_is_produced_after_sixth_face_only() {
        let mut loader = CubemapLoader::new(SIZE);
        let data = jpeg(SIZE, 200);

        for (i, face) in CubeFace::ALL.iter().enumerate() {
            assert_eq!(loader.status(), LoadStatus::Loading { loaded: i });
            let out = loader.on_fetched(*face, &data);
            if i < 5 {
                assert!(out.is_none());
            } else {
                let buf = out.expect("sixth face completes the cube");
                assert_eq!(buf.size(), SIZE);
                assert_eq!(buf.as_bytes().len(), 6 * FaceBuffer::face_bytes(SIZE));
                // Opaque everywhere after RGB -> RGBA expansion.
                assert!(buf.as_bytes().chunks(4).all(|px| px[3] == 255));
            }
        }
        assert_eq!(loader.status(), LoadStatus::Ready);
        assert_eq!(loader.load_count(), 6);
    }

    #[test]
    fn faces_land_in_their_own_slot() {
        let mut loader = CubemapLoader::new(SIZE);
        let mut out = None;
        for face in CubeFace::ALL.iter().rev() {
            let shade = if *face == CubeFace::PosY { 250 } else { 5 };
            out = loader.on_fetched(*face, &jpeg(SIZE, shade));
        }
        let buf = out.unwrap();
        assert!(buf.face(CubeFace::PosY)[0] > 200);
        assert!(buf.face(CubeFace::NegY)[0] < 50);
    }

    #[test]
    fn duplicate_face_does_not_count() {
        let mut loader = CubemapLoader::new(SIZE);
        let data = jpeg(SIZE, 10);
        loader.on_fetched(CubeFace::PosX, &data);
        loader.on_fetched(CubeFace::PosX, &data);
        assert_eq!(loader.load_count(), 1);
    }

    // ── failure path ──────────────────────────────────────────────────────

    #[test]
    fn fetch_failure_is_sticky() {
        let mut loader = CubemapLoader::new(SIZE);
        let data = jpeg(SIZE, 10);

        loader.on_fetched(CubeFace::PosX, &data);
        loader.on_failed(CubeFace::NegX);
        assert_eq!(loader.status(), LoadStatus::Failed);

        for face in &CubeFace::ALL[2..] {
            assert!(loader.on_fetched(*face, &data).is_none());
        }
        assert_eq!(loader.status(), LoadStatus::Failed);
        assert_eq!(loader.load_count(), 1);
    }

    #[test]
    fn undecodable_face_fails_the_load() {
        let mut loader = CubemapLoader::new(SIZE);
        assert!(loader.on_fetched(CubeFace::PosZ, b"not a jpeg").is_none());
        assert!(loader.is_failed());
        assert_eq!(loader.status().message(), "LOAD FAILED!");
    }

    #[test]
    #[should_panic(expected = "unexpected dimensions")]
    fn wrong_face_size_is_a_bug() {
        let mut loader = CubemapLoader::new(SIZE);
        loader.on_fetched(CubeFace::PosX, &jpeg(SIZE * 2, 0));
    }

    #[test]
    fn status_messages() {
        assert_eq!(LoadStatus::Loading { loaded: 3 }.message(), "LOADING ...");
        assert_eq!(LoadStatus::Ready.message(), "LMB + move mouse to look around");
    }
}
