//=========================================================================
// Resource Factory
//=========================================================================
//
// Seam between the assets manager and the graphics/audio backend. The
// manager owns caching and lifetime; the factory only turns bytes into
// handles and releases them again.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;
use std::path::Path;

use log::trace;

//=== Internal Dependencies ===============================================

use super::error::BackendError;
use super::resource::{AssetKind, Font, Music, Resource, ResourceId, Shader, Sound, Texture};

//=== ResourceFactory Trait ===============================================

/// Decodes raw asset data into backend resources.
pub trait ResourceFactory {
    /// Whether this backend can produce `kind` at all.
    fn supports(&self, _kind: AssetKind) -> bool {
        true
    }

    fn create_texture(&mut self, name: &str, bytes: &[u8]) -> Result<Texture, BackendError>;
    fn create_font(&mut self, name: &str, bytes: &[u8]) -> Result<Font, BackendError>;
    fn create_sound(&mut self, name: &str, bytes: &[u8]) -> Result<Sound, BackendError>;

    /// Music is streamed, so it is opened from a file rather than a buffer.
    fn create_music(&mut self, name: &str, path: &Path) -> Result<Music, BackendError>;

    fn create_shader(&mut self, name: &str, bytes: &[u8]) -> Result<Shader, BackendError>;

    /// Frees the backend side of a resource. Called exactly once per
    /// resource produced by this factory.
    fn release(&mut self, resource: &Resource);
}

//=== HeadlessFactory =====================================================

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// Backend without a GPU or audio device.
///
/// Hands out sequential ids, reads image dimensions from PNG headers and
/// rejects empty data. Used for tests, servers and tools.
#[derive(Debug, Default)]
pub struct HeadlessFactory {
    next_id: u64,
    live: HashSet<ResourceId>,
    unsupported: Vec<AssetKind>,
}

impl HeadlessFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `kind` as unsupported by this backend.
    pub fn without(mut self, kind: AssetKind) -> Self {
        self.unsupported.push(kind);
        self
    }

    /// Number of resources created and not yet released.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    fn allocate(&mut self, name: &str, bytes: &[u8]) -> Result<ResourceId, BackendError> {
        if bytes.is_empty() {
            return Err(format!("'{}' contains no data", name).into());
        }
        Ok(self.next_id())
    }

    fn next_id(&mut self) -> ResourceId {
        self.next_id += 1;
        let id = ResourceId(self.next_id);
        self.live.insert(id);
        id
    }
}

/// Width and height from a PNG IHDR chunk.
fn png_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    if bytes.len() < 24 || bytes[..8] != PNG_SIGNATURE || &bytes[12..16] != b"IHDR" {
        return None;
    }
    let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
    let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
    Some((width, height))
}

impl ResourceFactory for HeadlessFactory {
    fn supports(&self, kind: AssetKind) -> bool {
        !self.unsupported.contains(&kind)
    }

    fn create_texture(&mut self, name: &str, bytes: &[u8]) -> Result<Texture, BackendError> {
        let id = self.allocate(name, bytes)?;
        let (width, height) = png_dimensions(bytes).unwrap_or((0, 0));
        Ok(Texture { id, width, height })
    }

    fn create_font(&mut self, name: &str, bytes: &[u8]) -> Result<Font, BackendError> {
        let id = self.allocate(name, bytes)?;
        Ok(Font { id, name: name.to_string() })
    }

    fn create_sound(&mut self, name: &str, bytes: &[u8]) -> Result<Sound, BackendError> {
        let id = self.allocate(name, bytes)?;
        Ok(Sound { id, byte_len: bytes.len() })
    }

    fn create_music(&mut self, name: &str, path: &Path) -> Result<Music, BackendError> {
        if !path.is_file() {
            return Err(format!("'{}' has no backing file at {}", name, path.display()).into());
        }
        let id = self.next_id();
        Ok(Music { id, path: path.to_path_buf() })
    }

    fn create_shader(&mut self, name: &str, bytes: &[u8]) -> Result<Shader, BackendError> {
        let id = self.allocate(name, bytes)?;
        Ok(Shader { id })
    }

    fn release(&mut self, resource: &Resource) {
        if !self.live.remove(&resource.id()) {
            trace!("Released unknown {} resource {:?}", resource.kind(), resource.id());
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn png_header(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = PNG_SIGNATURE.to_vec();
        bytes.extend_from_slice(&13u32.to_be_bytes());
        bytes.extend_from_slice(b"IHDR");
        bytes.extend_from_slice(&width.to_be_bytes());
        bytes.extend_from_slice(&height.to_be_bytes());
        bytes
    }

    #[test]
    fn texture_reads_png_dimensions() {
        let mut factory = HeadlessFactory::new();
        let texture = factory.create_texture("hero.png", &png_header(32, 16)).unwrap();
        assert_eq!((texture.width, texture.height), (32, 16));

        let raw = factory.create_texture("raw.bin", &[1, 2, 3]).unwrap();
        assert_eq!((raw.width, raw.height), (0, 0));
        assert_ne!(texture.id, raw.id);
    }

    #[test]
    fn empty_data_is_rejected() {
        let mut factory = HeadlessFactory::new();
        assert!(factory.create_sound("blip.wav", &[]).is_err());
        assert_eq!(factory.live_count(), 0);
    }

    #[test]
    fn release_frees_live_resources() {
        let mut factory = HeadlessFactory::new();
        let font = factory.create_font("mono.ttf", b"font").unwrap();
        assert_eq!(factory.live_count(), 1);

        factory.release(&Resource::Font(Rc::new(font)));
        assert_eq!(factory.live_count(), 0);
    }

    #[test]
    fn music_requires_a_backing_file() {
        let mut factory = HeadlessFactory::new();
        let file = tempfile::NamedTempFile::new().unwrap();

        let music = factory.create_music("theme.ogg", file.path()).unwrap();
        assert_eq!(music.path, file.path());
        assert!(factory
            .create_music("gone.ogg", Path::new("/definitely/not/here.ogg"))
            .is_err());
    }

    #[test]
    fn without_marks_kind_unsupported() {
        let factory = HeadlessFactory::new().without(AssetKind::Shader);
        assert!(!factory.supports(AssetKind::Shader));
        assert!(factory.supports(AssetKind::Texture));
    }
}
