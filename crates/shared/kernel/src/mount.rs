//! One-shot attachment of the root UI tree to its DOM anchor.

use pm_domain::constants::MOUNT_ANCHOR;
use std::borrow::Cow;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

#[pm_derive::pm_error]
pub enum MountError {
    #[error("Mount anchor '#{anchor}' not found{}", format_context(.context))]
    AnchorMissing { anchor: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Application is already mounted into '#{anchor}'{}", format_context(.context))]
    AlreadyMounted { anchor: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Document the application is mounted into.
pub trait MountHost {
    /// Whether an element with id `anchor` exists.
    fn has_anchor(&self, anchor: &str) -> bool;

    /// Renders the root tree (including the router) into `anchor`.
    fn launch(&self, anchor: &str);
}

/// Mount slot for one anchor; launches at most once.
#[derive(Debug)]
pub struct Mount {
    anchor: &'static str,
    mounted: AtomicBool,
}

/// The application's mount slot.
pub static APP: Mount = Mount::new(MOUNT_ANCHOR);

impl Mount {
    #[must_use]
    pub const fn new(anchor: &'static str) -> Self {
        Self { anchor, mounted: AtomicBool::new(false) }
    }

    #[must_use]
    pub const fn anchor(&self) -> &'static str {
        self.anchor
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    /// Launches the root tree into the anchor.
    ///
    /// # Errors
    /// * [`MountError::AlreadyMounted`] if this slot already launched.
    /// * [`MountError::AnchorMissing`] if the host has no element with the anchor id.
    pub fn mount(&self, host: &impl MountHost) -> Result<(), MountError> {
        if self.is_mounted() {
            return Err(MountError::AlreadyMounted { anchor: self.anchor.into(), context: None });
        }
        if !host.has_anchor(self.anchor) {
            return Err(MountError::AnchorMissing { anchor: self.anchor.into(), context: None });
        }
        if self.mounted.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire).is_err() {
            return Err(MountError::AlreadyMounted {
                anchor: self.anchor.into(),
                context: Some("Concurrent mount".into()),
            });
        }

        debug!(anchor = self.anchor, "Mounting application");
        host.launch(self.anchor);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct FakeDocument {
        ids: Vec<&'static str>,
        launched: RefCell<Vec<String>>,
    }

    impl MountHost for FakeDocument {
        fn has_anchor(&self, anchor: &str) -> bool {
            self.ids.contains(&anchor)
        }

        fn launch(&self, anchor: &str) {
            self.launched.borrow_mut().push(anchor.to_owned());
        }
    }

    #[test]
    fn mounts_once_into_present_anchor() {
        let mount = Mount::new("app");
        let doc = FakeDocument { ids: vec!["header", "app"], ..FakeDocument::default() };

        mount.mount(&doc).unwrap();
        assert!(mount.is_mounted());

        let err = mount.mount(&doc).unwrap_err();
        assert!(matches!(err, MountError::AlreadyMounted { .. }));
        assert_eq!(*doc.launched.borrow(), vec!["app".to_owned()]);
    }

    #[test]
    fn missing_anchor_is_reported_and_nothing_launches() {
        let mount = Mount::new("app");
        let doc = FakeDocument { ids: vec!["root"], ..FakeDocument::default() };

        let err = mount.mount(&doc).unwrap_err();
        assert!(matches!(err, MountError::AnchorMissing { ref anchor, .. } if anchor == "app"));
        assert!(!mount.is_mounted());
        assert!(doc.launched.borrow().is_empty());
        assert_eq!(err.to_string(), "Mount anchor '#app' not found");
    }

    #[test]
    fn app_slot_targets_app_anchor() {
        assert_eq!(APP.anchor(), "app");
    }
}
