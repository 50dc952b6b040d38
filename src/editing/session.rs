// Copyright 2025 the Symbology Authors
// SPDX-License-Identifier: Apache-2.0

//! Edit session - transactional editing of one layer's point style
//!
//! The session borrows the style from its owner (the legend layer) for as
//! long as the editor is open. It remembers a snapshot of the style as a
//! baseline; Apply moves the baseline forward, OK keeps the edits and cancel
//! puts the baseline back.
//!
//! All calls are serialized. A call that starts while another is running
//! (on another thread, or from a collaborator callback) fails with
//! `ConcurrencyViolation` instead of waiting.

use std::sync::{Mutex, MutexGuard, RwLock, TryLockError};

use super::collaborators::{Collaborators, SessionOptions};
use super::preview::{PreviewRequest, next_generation};
use super::state::{CloseOutcome, SessionState};
use crate::error::{Result, StyleError};
use crate::fields::{self, FieldEdit, FieldName, StyleFields};
use crate::fonts;
use crate::model::{LayerHandle, Rgba, StyleModel, read_style, write_style};
use crate::snapshot::StyleSnapshot;

/// Editing session for one layer's style
pub struct EditSession<'m> {
    /// The style being edited, owned by the caller
    model: &'m RwLock<StyleModel>,
    layer: LayerHandle,
    collaborators: Collaborators,
    options: SessionOptions,
    inner: Mutex<SessionInner>,
}

/// Mutable session state, guarded as a unit
struct SessionInner {
    state: SessionState,
    /// Baseline for dirtiness and cancel
    initial: StyleSnapshot,
    apply_enabled: bool,
    /// What the view currently shows
    fields: StyleFields,
    show_all_fonts: bool,
    font_list: Vec<String>,
    glyphs: Vec<u8>,
    selected_tab: usize,
}

impl SessionInner {
    fn mark_dirty(&mut self) {
        self.state = SessionState::Dirty;
        self.apply_enabled = true;
    }
}

impl<'m> EditSession<'m> {
    /// Open the editor on `model`.
    ///
    /// Captures the baseline snapshot, reads the fields for the view, loads
    /// the font list and requests a first preview.
    pub fn open(
        model: &'m RwLock<StyleModel>,
        layer: LayerHandle,
        collaborators: Collaborators,
        options: SessionOptions,
    ) -> Result<Self> {
        let (initial, fields) = {
            let style = read_style(model);
            (StyleSnapshot::capture(&style)?, fields::pull_from_model(&style))
        };

        let catalog = collaborators.fonts.as_ref();
        let font_list = fonts::selectable_fonts(catalog, options.show_all_fonts);
        let glyphs = fonts::glyphs_for(catalog, &fields.font_name);

        let session = Self {
            model,
            layer,
            collaborators,
            inner: Mutex::new(SessionInner {
                state: SessionState::Clean,
                initial,
                apply_enabled: false,
                fields,
                show_all_fonts: options.show_all_fonts,
                font_list,
                glyphs,
                selected_tab: options.tabs.last(),
            }),
            options,
        };

        tracing::info!("Opened style editor for layer {}", layer.0);
        session.request_preview();
        Ok(session)
    }

    // ========================================================================
    // EDITING
    // ========================================================================

    /// Apply one field edit from the view.
    ///
    /// The session becomes dirty whether or not the value actually changed;
    /// the real comparison happens at commit or close.
    pub fn apply_field_edit(&self, edit: FieldEdit) -> Result<()> {
        let mut inner = self.begin("apply_field_edit")?;
        let field = edit.field();
        {
            let mut style = write_style(self.model);
            let applied = fields::apply_edit(
                &mut inner.fields,
                &mut style,
                edit,
                self.collaborators.fonts.as_ref(),
            );
            if let Some(glyphs) = applied.glyphs {
                inner.glyphs = glyphs;
            }
        }
        inner.mark_dirty();
        tracing::debug!("Edited {}", field.as_str());
        self.request_preview();
        Ok(())
    }

    /// Apply an arbitrary change to the style.
    ///
    /// The view fields are re-read from the style afterwards.
    pub fn apply_with<F>(&self, mutator: F) -> Result<()>
    where
        F: FnOnce(&mut StyleModel),
    {
        let mut inner = self.begin("apply_with")?;
        {
            let mut style = write_style(self.model);
            mutator(&mut style);
            inner.fields = fields::pull_from_model(&style);
        }
        inner.mark_dirty();
        self.request_preview();
        Ok(())
    }

    /// Apply: tell the map about changes since the baseline and move the
    /// baseline to the current style. The editor stays open.
    ///
    /// Returns whether a redraw was requested.
    pub fn commit(&self) -> Result<bool> {
        let mut inner = self.begin("commit")?;
        if !self.options.apply_available {
            return Err(StyleError::ApplyUnavailable);
        }

        let current = StyleSnapshot::capture(&read_style(self.model))?;
        let changed = current != inner.initial;
        if changed {
            self.collaborators.redraw.style_changed(self.layer);
        }
        inner.initial = current;
        inner.state = SessionState::Clean;
        inner.apply_enabled = false;

        tracing::info!(
            "Applied style of layer {} ({})",
            self.layer.0,
            if changed { "changed" } else { "unchanged" }
        );
        Ok(changed)
    }

    /// Close the editor with OK (`confirm`) or cancel.
    ///
    /// OK keeps the style and requests a redraw if it differs from the
    /// baseline. Cancel restores the baseline, dropping every edit since
    /// open or the last Apply. On error the session stays open.
    pub fn close(&self, confirm: bool) -> Result<CloseOutcome> {
        let mut inner = self.begin("close")?;

        let outcome = if confirm {
            let current = StyleSnapshot::capture(&read_style(self.model))?;
            let notified = current != inner.initial;
            if notified {
                self.collaborators.redraw.style_changed(self.layer);
            }
            CloseOutcome::Confirmed { notified }
        } else {
            inner.initial.restore(&mut write_style(self.model))?;
            CloseOutcome::Cancelled
        };

        self.options.tabs.remember(inner.selected_tab);
        inner.state = SessionState::Closed;
        inner.apply_enabled = false;
        tracing::info!("Closed style editor for layer {}: {:?}", self.layer.0, outcome);
        Ok(outcome)
    }

    // ========================================================================
    // VIEW STATE
    // ========================================================================

    pub fn layer(&self) -> LayerHandle {
        self.layer
    }

    pub fn state(&self) -> Result<SessionState> {
        Ok(self.guard("state")?.state)
    }

    pub fn is_dirty(&self) -> Result<bool> {
        Ok(self.guard("is_dirty")?.state == SessionState::Dirty)
    }

    /// Whether the Apply action should be enabled
    pub fn apply_enabled(&self) -> Result<bool> {
        if !self.options.apply_available {
            return Ok(false);
        }
        Ok(self.guard("apply_enabled")?.apply_enabled)
    }

    /// The current baseline snapshot
    pub fn baseline(&self) -> Result<StyleSnapshot> {
        Ok(self.guard("baseline")?.initial.clone())
    }

    /// Field values as the view should show them
    pub fn fields(&self) -> Result<StyleFields> {
        Ok(self.guard("fields")?.fields.clone())
    }

    /// Fields relevant to the current fill and marker modes
    pub fn visible_fields(&self) -> Result<Vec<FieldName>> {
        Ok(self.guard("visible_fields")?.fields.visible_fields())
    }

    /// Foreground color for the symbol and glyph palettes
    pub fn palette_color(&self) -> Result<Rgba> {
        Ok(self.guard("palette_color")?.fields.fill_color)
    }

    /// Fonts the view may offer
    pub fn font_list(&self) -> Result<Vec<String>> {
        Ok(self.guard("font_list")?.font_list.clone())
    }

    /// Entry of the font list matching the style's font
    pub fn selected_font(&self) -> Result<Option<String>> {
        let inner = self.guard("selected_font")?;
        Ok(fonts::resolve_selection(&inner.font_list, &inner.fields.font_name))
    }

    /// Glyph codes of the current font
    pub fn glyphs(&self) -> Result<Vec<u8>> {
        Ok(self.guard("glyphs")?.glyphs.clone())
    }

    /// Toggle between the symbol-font allow list and every font.
    ///
    /// Only the offered list changes; the style is not edited.
    pub fn set_show_all_fonts(&self, show_all: bool) -> Result<Vec<String>> {
        let mut inner = self.begin("set_show_all_fonts")?;
        inner.show_all_fonts = show_all;
        inner.font_list = fonts::selectable_fonts(self.collaborators.fonts.as_ref(), show_all);
        Ok(inner.font_list.clone())
    }

    pub fn show_all_fonts(&self) -> Result<bool> {
        Ok(self.guard("show_all_fonts")?.show_all_fonts)
    }

    pub fn selected_tab(&self) -> Result<usize> {
        Ok(self.guard("selected_tab")?.selected_tab)
    }

    /// Record the tab the view switched to; remembered on close
    pub fn select_tab(&self, tab: usize) -> Result<()> {
        self.begin("select_tab")?.selected_tab = tab;
        Ok(())
    }

    // ========================================================================
    // INTERNALS
    // ========================================================================

    /// Take the session guard without waiting.
    fn guard(&self, operation: &'static str) -> Result<MutexGuard<'_, SessionInner>> {
        match self.inner.try_lock() {
            Ok(inner) => Ok(inner),
            Err(TryLockError::WouldBlock) => {
                tracing::warn!("{} rejected: session busy", operation);
                Err(StyleError::ConcurrencyViolation { operation })
            }
            Err(TryLockError::Poisoned(poisoned)) => {
                tracing::warn!("Session lock was poisoned, recovering");
                Ok(poisoned.into_inner())
            }
        }
    }

    /// Take the guard for a call that needs an open session.
    fn begin(&self, operation: &'static str) -> Result<MutexGuard<'_, SessionInner>> {
        let inner = self.guard(operation)?;
        if inner.state == SessionState::Closed {
            return Err(StyleError::SessionClosed);
        }
        Ok(inner)
    }

    /// Send the current style to the preview renderer.
    fn request_preview(&self) {
        let generation = next_generation();
        let style = read_style(self.model).clone();
        self.collaborators.preview.request_preview(PreviewRequest {
            generation,
            style,
            size: self.options.preview_size,
            background: self.options.preview_background,
        });
    }
}
