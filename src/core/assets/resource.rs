//=========================================================================
// Resource Kinds
//=========================================================================
//
// Handles produced by the resource factory, and the tagged variant the
// assets manager stores them in.
//
// Architecture:
//   Asset::KIND ──selects──> per-kind loader ──> Resource::<Kind>(Rc<T>)
//                                                   │
//   Asset::from_resource(&Resource) <───────────────┘ (typed cache hit)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::path::PathBuf;
use std::rc::Rc;

//=== ResourceId ==========================================================

/// Backend-assigned identifier of a decoded resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(pub u64);

//=== Handle Types ========================================================

/// Decoded image ready for drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    pub id: ResourceId,
    pub width: u32,
    pub height: u32,
}

/// Rasterizable font face.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Font {
    pub id: ResourceId,
    pub name: String,
}

/// Short sound effect held fully in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sound {
    pub id: ResourceId,
    pub byte_len: usize,
}

/// Streamed music track. Always backed by a file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Music {
    pub id: ResourceId,
    pub path: PathBuf,
}

/// Compiled shader effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shader {
    pub id: ResourceId,
}

//=== AssetKind ===========================================================

/// Supported resource kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Texture,
    Font,
    Sound,
    Music,
    Shader,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Texture => "texture",
            Self::Font => "font",
            Self::Sound => "sound",
            Self::Music => "music",
            Self::Shader => "shader",
        };
        f.write_str(name)
    }
}

//=== Resource ============================================================

/// A cached resource of any supported kind.
#[derive(Debug, Clone)]
pub enum Resource {
    Texture(Rc<Texture>),
    Font(Rc<Font>),
    Sound(Rc<Sound>),
    Music(Rc<Music>),
    Shader(Rc<Shader>),
}

impl Resource {
    pub fn kind(&self) -> AssetKind {
        match self {
            Self::Texture(_) => AssetKind::Texture,
            Self::Font(_) => AssetKind::Font,
            Self::Sound(_) => AssetKind::Sound,
            Self::Music(_) => AssetKind::Music,
            Self::Shader(_) => AssetKind::Shader,
        }
    }

    pub fn id(&self) -> ResourceId {
        match self {
            Self::Texture(t) => t.id,
            Self::Font(f) => f.id,
            Self::Sound(s) => s.id,
            Self::Music(m) => m.id,
            Self::Shader(s) => s.id,
        }
    }
}

//=== Asset Trait =========================================================

/// Ties a handle type to its [`AssetKind`] and its [`Resource`] variant.
///
/// `AssetsManager::get::<T>` uses `T::KIND` to pick the loader, so the
/// requested kind is fixed at compile time.
pub trait Asset: Sized + 'static {
    const KIND: AssetKind;

    fn into_resource(asset: Rc<Self>) -> Resource;

    /// Returns the handle if `resource` holds this kind.
    fn from_resource(resource: &Resource) -> Option<Rc<Self>>;
}

macro_rules! impl_asset {
    ($ty:ident) => {
        impl Asset for $ty {
            const KIND: AssetKind = AssetKind::$ty;

            fn into_resource(asset: Rc<Self>) -> Resource {
                Resource::$ty(asset)
            }

            fn from_resource(resource: &Resource) -> Option<Rc<Self>> {
                match resource {
                    Resource::$ty(asset) => Some(Rc::clone(asset)),
                    _ => None,
                }
            }
        }
    };
}

impl_asset!(Texture);
impl_asset!(Font);
impl_asset!(Sound);
impl_asset!(Music);
impl_asset!(Shader);

//=========================================================================
// Tests
//=========================================================================
