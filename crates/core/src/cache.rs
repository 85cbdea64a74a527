//! Session-wide cache of light modifier lists.
//!
//! Tooling asks for the same projection many times while a file is open.
//! Handing out one shared instance per projection means its annotations
//! are projected once per session instead of once per query.

use crate::modifier_list::LightModifierList;
use crate::session::LightSession;
use dashmap::DashMap;
use lightscope_api::{DeclarationId, LightDeclarationProjection};
use std::sync::Arc;
use tracing::debug;

pub struct LightElementCache {
    session: Arc<LightSession>,
    entries: DashMap<LightDeclarationProjection, Arc<LightModifierList>>,
}

impl LightElementCache {
    pub fn new(session: Arc<LightSession>) -> Self {
        Self {
            session,
            entries: DashMap::new(),
        }
    }

    pub fn session(&self) -> &Arc<LightSession> {
        &self.session
    }

    pub fn modifier_list(&self, projection: LightDeclarationProjection) -> Arc<LightModifierList> {
        self.entries
            .entry(projection)
            .or_insert_with(|| Arc::new(self.session.modifier_list(projection)))
            .clone()
    }

    /// Drops every projection of `owner`; the next request builds a fresh
    /// instance that projects again.
    pub fn invalidate(&self, owner: DeclarationId) {
        let before = self.entries.len();
        self.entries.retain(|projection, _| projection.owner != owner);
        debug!(
            %owner,
            dropped = before.saturating_sub(self.entries.len()),
            "invalidated light elements"
        );
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
