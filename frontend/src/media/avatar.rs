use log::debug;

/// Below or at this size (px) the small default image is enough.
const SMALL_AVATAR_MAX: u32 = 48;

/// Avatar looked up by handle through the public avatar proxy.
pub fn proxy_avatar_url(handle: &str) -> String {
    format!(
        "https://unavatar.io/x/{}?fallback=false",
        urlencoding::encode(handle)
    )
}

pub fn default_avatar_url(size: u32) -> String {
    let variant = if size > SMALL_AVATAR_MAX { "bigger" } else { "normal" };
    format!(
        "https://abs.twimg.com/sticky/default_profile_images/default_profile_{}.png",
        variant
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded,
    Failed,
}

/// Which source of the fallback chain is currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarStage {
    Proxy,
    Backup,
    Default,
}

/// Source selection for one avatar element: proxy, then the explicit backup
/// when there is one, then the generic default image.
#[derive(Debug, Clone, PartialEq)]
pub struct AvatarChain {
    handle: String,
    backup: Option<String>,
    size: u32,
    stage: AvatarStage,
    state: LoadState,
}

impl AvatarChain {
    pub fn new(handle: &str, backup: Option<&str>, size: u32) -> Self {
        Self {
            handle: handle.to_string(),
            backup: backup.filter(|url| !url.is_empty()).map(str::to_string),
            size,
            stage: AvatarStage::Proxy,
            state: LoadState::Loading,
        }
    }

    pub fn handle(&self) -> &str {
        &self.handle
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn stage(&self) -> AvatarStage {
        self.stage
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn src(&self) -> String {
        match self.stage {
            AvatarStage::Proxy => proxy_avatar_url(&self.handle),
            AvatarStage::Backup => self.backup.clone().unwrap_or_else(|| default_avatar_url(self.size)),
            AvatarStage::Default => default_avatar_url(self.size),
        }
    }

    /// Moves to the next source. Returns true when the chain changed and the
    /// element needs a new `src`; a failing default is terminal.
    pub fn on_error(&mut self) -> bool {
        let next = match (self.stage, &self.backup) {
            (AvatarStage::Proxy, Some(_)) => AvatarStage::Backup,
            (AvatarStage::Proxy, None) | (AvatarStage::Backup, _) => AvatarStage::Default,
            (AvatarStage::Default, _) => {
                if self.state == LoadState::Failed {
                    return false;
                }
                self.state = LoadState::Failed;
                debug!("Avatar for @{} failed on every source", self.handle);
                return true;
            }
        };
        debug!("Avatar for @{} falling back to {:?}", self.handle, next);
        self.stage = next;
        self.state = LoadState::Loading;
        true
    }

    /// Returns true only for the first successful load.
    pub fn on_load(&mut self) -> bool {
        if self.state != LoadState::Loading {
            return false;
        }
        self.state = LoadState::Loaded;
        true
    }
}
