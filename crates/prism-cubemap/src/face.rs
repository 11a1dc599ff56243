use std::fmt;

/// Cube face, in GPU layer order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CubeFace {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl CubeFace {
    pub const COUNT: usize = 6;

    pub const ALL: [CubeFace; Self::COUNT] = [
        CubeFace::PosX,
        CubeFace::NegX,
        CubeFace::PosY,
        CubeFace::NegY,
        CubeFace::PosZ,
        CubeFace::NegZ,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Asset file holding this face.
    pub fn file_name(self) -> &'static str {
        match self {
            CubeFace::PosX => "nb2_posx.jpg",
            CubeFace::NegX => "nb2_negx.jpg",
            CubeFace::PosY => "nb2_posy.jpg",
            CubeFace::NegY => "nb2_negy.jpg",
            CubeFace::PosZ => "nb2_posz.jpg",
            CubeFace::NegZ => "nb2_negz.jpg",
        }
    }
}

impl fmt::Display for CubeFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CubeFace::PosX => "+X",
            CubeFace::NegX => "-X",
            CubeFace::PosY => "+Y",
            CubeFace::NegY => "-Y",
            CubeFace::PosZ => "+Z",
            CubeFace::NegZ => "-Z",
        };
        f.write_str(s)
    }
}

/// Six square RGBA8 faces stored back to back in [`CubeFace::ALL`] order.
pub struct FaceBuffer {
    size: u32,
    bytes: Vec<u8>,
}

impl FaceBuffer {
    pub fn new(size: u32) -> Self {
        Self {
            size,
            bytes: vec![0; Self::face_bytes(size) * CubeFace::COUNT],
        }
    }

    /// Byte size of one `size`×`size` RGBA8 face.
    pub fn face_bytes(size: u32) -> usize {
        (size as usize) * (size as usize) * 4
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn face(&self, face: CubeFace) -> &[u8] {
        let stride = Self::face_bytes(self.size);
        let start = face.index() * stride;
        &self.bytes[start..start + stride]
    }

    pub fn face_mut(&mut self, face: CubeFace) -> &mut [u8] {
        let stride = Self::face_bytes(self.size);
        let start = face.index() * stride;
        &mut self.bytes[start..start + stride]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for FaceBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FaceBuffer")
            .field("size", &self.size)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faces_follow_layer_order() {
        for (i, face) in CubeFace::ALL.iter().enumerate() {
            assert_eq!(face.index(), i);
            assert_eq!(CubeFace::from_index(i), Some(*face));
        }
        assert_eq!(CubeFace::from_index(6), None);
        assert_eq!(CubeFace::NegY.file_name(), "nb2_negy.jpg");
    }

    #[test]
    fn face_slices_do_not_overlap() {
        let mut buf = FaceBuffer::new(2);
        assert_eq!(buf.as_bytes().len(), 6 * 16);

        buf.face_mut(CubeFace::PosZ).fill(7);
        assert!(buf.face(CubeFace::NegY).iter().all(|&b| b == 0));
        assert!(buf.face(CubeFace::PosZ).iter().all(|&b| b == 7));
        assert!(buf.face(CubeFace::NegZ).iter().all(|&b| b == 0));
        assert_eq!(&buf.as_bytes()[64..80], &[7; 16]);
    }
}
