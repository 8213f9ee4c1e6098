//=========================================================================
// Assets Manager
//=========================================================================
//
// Deduplicated cache of named, typed resources with a state-scoped
// eviction policy.
//
// Architecture:
//   AssetsManager
//     ├─ source: Box<dyn AssetSource>        (bytes / file paths)
//     ├─ factory: Box<dyn ResourceFactory>   (decode / release)
//     └─ loaded: HashMap<key, LoadedAsset>
//
// Keys are normalized names (lowercase, forward slashes). Entries loaded
// with `keep_after_state_change` survive the sweep run on every state
// transition; everything else is released.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use log::{debug, trace, warn};

//=== Internal Dependencies ===============================================

use crate::core::error::GameError;
use crate::core::state::StateId;

//=== Module Declarations =================================================

mod error;
mod factory;
mod resource;
mod source;

//=== Public API ==========================================================

pub use error::{AssetError, BackendError};
pub use factory::{HeadlessFactory, ResourceFactory};
pub use resource::{Asset, AssetKind, Font, Music, Resource, ResourceId, Shader, Sound, Texture};
pub use source::{AssetSource, DirectorySource, MemorySource};

//=== LoadedAsset =========================================================

#[derive(Debug)]
struct LoadedAsset {
    resource: Resource,
    name: String,
    keep_after_state_change: bool,
    temp_file: Option<PathBuf>,
}

//=== Key Normalization ===================================================

fn normalize(name: &str) -> String {
    name.replace('\\', "/").to_lowercase()
}

//=== AssetsManager =======================================================

/// Keyed cache of loaded resources.
pub struct AssetsManager {
    source: Box<dyn AssetSource>,
    factory: Box<dyn ResourceFactory>,
    loaded: HashMap<String, LoadedAsset>,
}

impl AssetsManager {
    pub fn new(source: Box<dyn AssetSource>, factory: Box<dyn ResourceFactory>) -> Self {
        Self {
            source,
            factory,
            loaded: HashMap::new(),
        }
    }

    //--- Loading ----------------------------------------------------------

    /// Returns the cached asset, loading it state-scoped on a miss.
    pub fn get<T: Asset>(&mut self, name: &str) -> Result<Rc<T>, GameError> {
        self.get_with(name, false)
    }

    /// Returns the cached asset, loading it persistent on a miss.
    pub fn get_persistent<T: Asset>(&mut self, name: &str) -> Result<Rc<T>, GameError> {
        self.get_with(name, true)
    }

    /// Raising form of [`try_load`](Self::try_load).
    pub fn get_with<T: Asset>(&mut self, name: &str, keep_after_state_change: bool) -> Result<Rc<T>, GameError> {
        self.try_load(name, keep_after_state_change)
            .map_err(|source| GameError::AssetLoad {
                name: name.to_string(),
                source,
            })
    }

    /// Returns the cached asset or loads it.
    ///
    /// A cache hit never changes the entry's keep flag. A hit under a
    /// different kind fails with [`AssetError::TypeMismatch`] and leaves
    /// the cache untouched.
    pub fn try_load<T: Asset>(&mut self, name: &str, keep_after_state_change: bool) -> Result<Rc<T>, AssetError> {
        let key = normalize(name);

        if let Some(entry) = self.loaded.get(&key) {
            return T::from_resource(&entry.resource).ok_or_else(|| AssetError::TypeMismatch {
                name: name.to_string(),
                cached: entry.resource.kind(),
                requested: T::KIND,
            });
        }

        let (resource, temp_file) = self.load_resource(T::KIND, name)?;
        let asset = T::from_resource(&resource).ok_or_else(|| AssetError::TypeMismatch {
            name: name.to_string(),
            cached: resource.kind(),
            requested: T::KIND,
        })?;

        debug!(
            "Loaded {} '{}' as {:?}{}",
            T::KIND,
            name,
            resource.id(),
            if keep_after_state_change { " (persistent)" } else { "" }
        );

        self.loaded.insert(
            key,
            LoadedAsset {
                resource,
                name: name.to_string(),
                keep_after_state_change,
                temp_file,
            },
        );
        Ok(asset)
    }

    //--- Per-kind loaders -------------------------------------------------

    fn load_resource(&mut self, kind: AssetKind, name: &str) -> Result<(Resource, Option<PathBuf>), AssetError> {
        if !self.factory.supports(kind) {
            return Err(AssetError::Unsupported {
                name: name.to_string(),
                kind,
            });
        }
        if !self.source.exists(name) {
            return Err(AssetError::NotFound(name.to_string()));
        }

        match kind {
            AssetKind::Texture => {
                let bytes = self.read(name)?;
                let texture = self
                    .factory
                    .create_texture(name, &bytes)
                    .map_err(|source| decode_error(name, kind, source))?;
                Ok((Texture::into_resource(Rc::new(texture)), None))
            }
            AssetKind::Font => {
                let bytes = self.read(name)?;
                let font = self
                    .factory
                    .create_font(name, &bytes)
                    .map_err(|source| decode_error(name, kind, source))?;
                Ok((Font::into_resource(Rc::new(font)), None))
            }
            AssetKind::Sound => {
                let bytes = self.read(name)?;
                let sound = self
                    .factory
                    .create_sound(name, &bytes)
                    .map_err(|source| decode_error(name, kind, source))?;
                Ok((Sound::into_resource(Rc::new(sound)), None))
            }
            AssetKind::Music => self.load_music(name),
            AssetKind::Shader => {
                let bytes = self.read(name)?;
                let shader = self
                    .factory
                    .create_shader(name, &bytes)
                    .map_err(|source| decode_error(name, kind, source))?;
                Ok((Shader::into_resource(Rc::new(shader)), None))
            }
        }
    }

    /// Music streams from disk, so sources without real files get a
    /// temporary copy that lives as long as the entry.
    fn load_music(&mut self, name: &str) -> Result<(Resource, Option<PathBuf>), AssetError> {
        let (path, temp_file) = match self.source.file_path(name) {
            Some(path) => (path, None),
            None => {
                let bytes = self.read(name)?;
                let path = write_temp_file(name, &bytes)?;
                (path.clone(), Some(path))
            }
        };

        match self.factory.create_music(name, &path) {
            Ok(music) => Ok((Music::into_resource(Rc::new(music)), temp_file)),
            Err(source) => {
                if let Some(temp) = &temp_file {
                    remove_temp_file(temp);
                }
                Err(decode_error(name, AssetKind::Music, source))
            }
        }
    }

    fn read(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        self.source.read(name).map_err(|source| AssetError::Io {
            name: name.to_string(),
            source,
        })
    }

    //--- Unloading --------------------------------------------------------

    /// Releases and removes the named entry. Returns whether it existed.
    pub fn unload(&mut self, name: &str) -> bool {
        match self.loaded.remove(&normalize(name)) {
            Some(entry) => {
                debug!("Unloaded {} '{}'", entry.resource.kind(), entry.name);
                self.release(entry);
                true
            }
            None => false,
        }
    }

    /// Unloads and loads the entry again with the same kind and keep flag.
    ///
    /// Returns `Ok(false)` if nothing was loaded under `name`. The old entry
    /// is released before loading, so a failed reload leaves nothing cached
    /// under `name`.
    pub fn reload(&mut self, name: &str) -> Result<bool, AssetError> {
        let (kind, keep) = match self.loaded.get(&normalize(name)) {
            Some(entry) => (entry.resource.kind(), entry.keep_after_state_change),
            None => return Ok(false),
        };

        self.unload(name);
        match kind {
            AssetKind::Texture => self.try_load::<Texture>(name, keep).map(drop)?,
            AssetKind::Font => self.try_load::<Font>(name, keep).map(drop)?,
            AssetKind::Sound => self.try_load::<Sound>(name, keep).map(drop)?,
            AssetKind::Music => self.try_load::<Music>(name, keep).map(drop)?,
            AssetKind::Shader => self.try_load::<Shader>(name, keep).map(drop)?,
        }
        Ok(true)
    }

    /// Sweep run by the loop driver when the current state changes.
    ///
    /// Does nothing when `from == to`. Returns the number of evicted entries.
    pub fn on_state_change(&mut self, from: Option<StateId>, to: Option<StateId>) -> usize {
        if from == to {
            return 0;
        }

        let scoped: Vec<String> = self
            .loaded
            .iter()
            .filter(|(_, entry)| !entry.keep_after_state_change)
            .map(|(key, _)| key.clone())
            .collect();

        for key in &scoped {
            if let Some(entry) = self.loaded.remove(key) {
                trace!("Sweeping {} '{}'", entry.resource.kind(), entry.name);
                self.release(entry);
            }
        }

        debug!(
            "State change swept {} asset(s), {} persistent remain",
            scoped.len(),
            self.loaded.len()
        );
        scoped.len()
    }

    /// Releases every entry unconditionally.
    pub fn dispose(&mut self) {
        if self.loaded.is_empty() {
            return;
        }
        let entries: Vec<LoadedAsset> = self.loaded.drain().map(|(_, entry)| entry).collect();
        let count = entries.len();
        for entry in entries {
            self.release(entry);
        }
        debug!("Disposed {} asset(s)", count);
    }

    fn release(&mut self, entry: LoadedAsset) {
        self.factory.release(&entry.resource);
        if let Some(temp) = &entry.temp_file {
            remove_temp_file(temp);
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Cached asset of kind `T`, without loading on a miss.
    pub fn cached<T: Asset>(&self, name: &str) -> Option<Rc<T>> {
        self.loaded
            .get(&normalize(name))
            .and_then(|entry| T::from_resource(&entry.resource))
    }

    pub fn has_loaded(&self, name: &str) -> bool {
        self.loaded.contains_key(&normalize(name))
    }

    pub fn is_kept_after_state_change(&self, name: &str) -> bool {
        self.loaded
            .get(&normalize(name))
            .is_some_and(|entry| entry.keep_after_state_change)
    }

    /// Kind of the cached entry, if any.
    pub fn kind_of(&self, name: &str) -> Option<AssetKind> {
        self.loaded.get(&normalize(name)).map(|entry| entry.resource.kind())
    }

    /// Number of cached entries.
    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    /// Number of cached entries the next sweep would evict.
    pub fn state_loaded_count(&self) -> usize {
        self.loaded
            .values()
            .filter(|entry| !entry.keep_after_state_change)
            .count()
    }
}

impl Drop for AssetsManager {
    fn drop(&mut self) {
        self.dispose();
    }
}

//=== Helpers =============================================================

fn decode_error(name: &str, kind: AssetKind, source: BackendError) -> AssetError {
    AssetError::Decode {
        name: name.to_string(),
        kind,
        source,
    }
}

fn write_temp_file(name: &str, bytes: &[u8]) -> Result<PathBuf, AssetError> {
    let temp_error = |source: std::io::Error| AssetError::TempFile {
        name: name.to_string(),
        source,
    };

    let suffix = Path::new(name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();

    let mut file = tempfile::Builder::new()
        .prefix("cadence-asset-")
        .suffix(&suffix)
        .tempfile()
        .map_err(temp_error)?;
    file.write_all(bytes).map_err(temp_error)?;

    let (_, path) = file.keep().map_err(|err| temp_error(err.error))?;
    trace!("Staged '{}' at {}", name, path.display());
    Ok(path)
}

fn remove_temp_file(path: &Path) {
    if let Err(err) = std::fs::remove_file(path) {
        warn!("Failed to delete temporary file {}: {}", path.display(), err);
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    //=== Test Doubles ===

    /// Headless backend that records every release.
    struct RecordingFactory {
        inner: HeadlessFactory,
        released: Rc<RefCell<Vec<ResourceId>>>,
    }

    impl ResourceFactory for RecordingFactory {
        fn supports(&self, kind: AssetKind) -> bool {
            self.inner.supports(kind)
        }
        fn create_texture(&mut self, name: &str, bytes: &[u8]) -> Result<Texture, BackendError> {
            self.inner.create_texture(name, bytes)
        }
        fn create_font(&mut self, name: &str, bytes: &[u8]) -> Result<Font, BackendError> {
            self.inner.create_font(name, bytes)
        }
        fn create_sound(&mut self, name: &str, bytes: &[u8]) -> Result<Sound, BackendError> {
            self.inner.create_sound(name, bytes)
        }
        fn create_music(&mut self, name: &str, path: &Path) -> Result<Music, BackendError> {
            self.inner.create_music(name, path)
        }
        fn create_shader(&mut self, name: &str, bytes: &[u8]) -> Result<Shader, BackendError> {
            self.inner.create_shader(name, bytes)
        }
        fn release(&mut self, resource: &Resource) {
            self.released.borrow_mut().push(resource.id());
            self.inner.release(resource);
        }
    }

    /// Source the test keeps a handle to after handing it to the manager.
    struct SharedSource(Rc<RefCell<MemorySource>>);

    impl AssetSource for SharedSource {
        fn exists(&self, name: &str) -> bool {
            self.0.borrow().exists(name)
        }
        fn read(&self, name: &str) -> std::io::Result<Vec<u8>> {
            self.0.borrow().read(name)
        }
    }

    fn source() -> MemorySource {
        MemorySource::new()
            .with_file("engine/font.ttf", b"font".to_vec())
            .with_file("level/texture.png", b"pixels".to_vec())
            .with_file("level/blip.wav", b"wave".to_vec())
            .with_file("level/theme.ogg", b"vorbis".to_vec())
            .with_file("level/empty.png", Vec::new())
    }

    fn manager() -> (AssetsManager, Rc<RefCell<Vec<ResourceId>>>) {
        let released = Rc::new(RefCell::new(Vec::new()));
        let factory = RecordingFactory {
            inner: HeadlessFactory::new().without(AssetKind::Shader),
            released: Rc::clone(&released),
        };
        (AssetsManager::new(Box::new(source()), Box::new(factory)), released)
    }

    const A: Option<StateId> = Some(StateId(1));
    const B: Option<StateId> = Some(StateId(2));

    //=== Cache ===

    #[test]
    fn repeated_get_returns_same_instance() {
        let (mut assets, _) = manager();
        let first = assets.get::<Texture>("level/texture.png").unwrap();
        let second = assets.get::<Texture>("level/texture.png").unwrap();

        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(assets.loaded_count(), 1);
    }

    #[test]
    fn lookup_is_case_and_separator_insensitive() {
        let (mut assets, _) = manager();
        let first = assets.get::<Texture>("level/texture.png").unwrap();
        let second = assets.get::<Texture>("LEVEL\\Texture.PNG").unwrap();

        assert!(Rc::ptr_eq(&first, &second));
        assert!(assets.has_loaded("Level/Texture.png"));
    }

    #[test]
    fn different_kind_on_hit_is_type_mismatch() {
        let (mut assets, released) = manager();
        let texture = assets.get::<Texture>("level/texture.png").unwrap();

        let err = assets.try_load::<Sound>("level/texture.png", false).unwrap_err();
        assert!(err.is_type_mismatch());
        assert!(matches!(
            err,
            AssetError::TypeMismatch { cached: AssetKind::Texture, requested: AssetKind::Sound, .. }
        ));

        // no reload happened
        assert!(released.borrow().is_empty());
        let again = assets.get::<Texture>("level/texture.png").unwrap();
        assert!(Rc::ptr_eq(&texture, &again));
    }

    #[test]
    fn cached_never_loads() {
        let (mut assets, _) = manager();
        assert!(assets.cached::<Font>("engine/font.ttf").is_none());

        let font = assets.get::<Font>("engine/font.ttf").unwrap();
        assert!(Rc::ptr_eq(&font, &assets.cached::<Font>("ENGINE/font.ttf").unwrap()));
        assert!(assets.cached::<Texture>("engine/font.ttf").is_none());
    }

    #[test]
    fn cache_hit_keeps_first_flag() {
        let (mut assets, _) = manager();
        assets.get::<Font>("engine/font.ttf").unwrap();
        assets.get_persistent::<Font>("engine/font.ttf").unwrap();

        assert!(!assets.is_kept_after_state_change("engine/font.ttf"));
    }

    //=== Failures ===

    #[test]
    fn missing_name_is_not_found() {
        let (mut assets, _) = manager();
        let err = assets.try_load::<Texture>("level/missing.png", false).unwrap_err();
        assert!(matches!(err, AssetError::NotFound(ref name) if name == "level/missing.png"));
        assert!(!assets.has_loaded("level/missing.png"));
    }

    #[test]
    fn unsupported_kind_is_reported() {
        let (mut assets, _) = manager();
        let err = assets.try_load::<Shader>("level/texture.png", false).unwrap_err();
        assert!(matches!(err, AssetError::Unsupported { kind: AssetKind::Shader, .. }));
    }

    #[test]
    fn decode_failure_is_wrapped_by_get() {
        let (mut assets, _) = manager();
        let err = assets.get::<Texture>("level/empty.png").unwrap_err();

        match err {
            GameError::AssetLoad { name, source } => {
                assert_eq!(name, "level/empty.png");
                assert!(matches!(source, AssetError::Decode { kind: AssetKind::Texture, .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(assets.loaded_count(), 0);
    }

    //=== Unload / Reload ===

    #[test]
    fn unload_releases_and_reports_presence() {
        let (mut assets, released) = manager();
        let sound = assets.get::<Sound>("level/blip.wav").unwrap();

        assert!(assets.unload("LEVEL/BLIP.WAV"));
        assert!(!assets.unload("level/blip.wav"));
        assert_eq!(*released.borrow(), vec![sound.id]);
    }

    #[test]
    fn reload_keeps_kind_and_flag() {
        let (mut assets, released) = manager();
        let before = assets.get_persistent::<Font>("engine/font.ttf").unwrap();

        assert!(assets.reload("engine/font.ttf").unwrap());
        let after = assets.get::<Font>("engine/font.ttf").unwrap();

        assert!(!Rc::ptr_eq(&before, &after));
        assert!(assets.is_kept_after_state_change("engine/font.ttf"));
        assert_eq!(*released.borrow(), vec![before.id]);
    }

    #[test]
    fn failed_reload_leaves_entry_unloaded() {
        let shared = Rc::new(RefCell::new(source()));
        let mut assets = AssetsManager::new(
            Box::new(SharedSource(Rc::clone(&shared))),
            Box::new(HeadlessFactory::new()),
        );
        assets.get::<Texture>("level/texture.png").unwrap();

        assert!(shared.borrow_mut().remove("level/texture.png"));
        let err = assets.reload("level/texture.png").unwrap_err();

        assert!(matches!(err, AssetError::NotFound(_)));
        assert!(!assets.has_loaded("level/texture.png"));
        assert_eq!(assets.loaded_count(), 0);
    }

    #[test]
    fn reload_of_unknown_name_is_noop() {
        let (mut assets, _) = manager();
        assert!(!assets.reload("engine/font.ttf").unwrap());
        assert_eq!(assets.loaded_count(), 0);
    }

    //=== Sweep ===

    #[test]
    fn sweep_evicts_only_state_scoped_entries() {
        let (mut assets, _) = manager();
        let font = assets.get_persistent::<Font>("engine/font.ttf").unwrap();
        assets.get::<Texture>("level/texture.png").unwrap();
        assert_eq!(assets.state_loaded_count(), 1);

        assert_eq!(assets.on_state_change(A, B), 1);

        assert!(assets.has_loaded("engine/font.ttf"));
        assert!(!assets.has_loaded("level/texture.png"));
        assert!(Rc::ptr_eq(&font, &assets.get::<Font>("engine/font.ttf").unwrap()));
        assert_eq!(assets.state_loaded_count(), 0);
    }

    #[test]
    fn sweep_is_skipped_for_same_endpoints() {
        let (mut assets, _) = manager();
        assets.get::<Texture>("level/texture.png").unwrap();

        assert_eq!(assets.on_state_change(A, A), 0);
        assert_eq!(assets.on_state_change(None, None), 0);
        assert!(assets.has_loaded("level/texture.png"));

        assert_eq!(assets.on_state_change(None, A), 1);
    }

    #[test]
    fn dispose_releases_everything() {
        let (mut assets, released) = manager();
        assets.get_persistent::<Font>("engine/font.ttf").unwrap();
        assets.get::<Sound>("level/blip.wav").unwrap();

        assets.dispose();
        assert_eq!(assets.loaded_count(), 0);
        assert_eq!(released.borrow().len(), 2);

        drop(assets);
        assert_eq!(released.borrow().len(), 2);
    }

    //=== Temporary Files ===

    #[test]
    fn music_from_memory_is_staged_and_cleaned_up() {
        let (mut assets, _) = manager();
        let music = assets.get::<Music>("level/theme.ogg").unwrap();

        assert!(music.path.is_file());
        assert_eq!(std::fs::read(&music.path).unwrap(), b"vorbis");
        assert_eq!(music.path.extension().unwrap(), "ogg");

        assert!(assets.unload("level/theme.ogg"));
        assert!(!music.path.exists());
    }

    #[test]
    fn music_staging_is_removed_by_sweep() {
        let (mut assets, _) = manager();
        let music = assets.get::<Music>("level/theme.ogg").unwrap();

        assets.on_state_change(A, B);
        assert!(!music.path.exists());
    }

    #[test]
    fn music_from_directory_uses_file_in_place() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("theme.ogg"), b"vorbis").unwrap();
        let mut assets = AssetsManager::new(
            Box::new(DirectorySource::new(dir.path())),
            Box::new(HeadlessFactory::new()),
        );

        let music = assets.get::<Music>("theme.ogg").unwrap();
        assert_eq!(music.path, dir.path().join("theme.ogg"));

        assets.unload("theme.ogg");
        assert!(dir.path().join("theme.ogg").exists());
    }
}
