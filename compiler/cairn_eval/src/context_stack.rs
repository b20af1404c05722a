//! Per-run arena of context frames.
//!
//! Every user function call owns one frame. A frame is either a root or the
//! child of a live frame; the text a model sees for a frame is the
//! concatenation of its ancestors' items followed by its own. Handles are
//! generational, so a stale [`FrameId`] is rejected instead of aliasing a
//! recycled slot.

use std::fmt;

use serde::Serialize;

/// Generational handle to a frame in a [`ContextStack`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct FrameId {
    index: u32,
    generation: u32,
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}.{}", self.index, self.generation)
    }
}

/// Where a frame item came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum ItemOrigin {
    /// A string literal or computed value injected with `!` or a bare string
    /// statement.
    Injected,
    /// A parameter of the current function, injected by name.
    Parameter(String),
    /// The result of calling the named function, injected directly.
    CallResult(String),
}

/// One piece of text appended to a frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContentItem {
    pub origin: ItemOrigin,
    pub text: String,
}

impl ContentItem {
    pub fn injected(text: impl Into<String>) -> Self {
        ContentItem {
            origin: ItemOrigin::Injected,
            text: text.into(),
        }
    }
}

/// Misuse of the frame arena.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    #[error("frame {0} has already been released")]
    Released(FrameId),
    #[error("frame {frame} still has {children} live child frame(s)")]
    LiveChildren { frame: FrameId, children: u32 },
    #[error("no call is active")]
    NoActiveFrame,
}

#[derive(Debug)]
struct Frame {
    parent: Option<FrameId>,
    items: Vec<ContentItem>,
    live_children: u32,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    frame: Option<Frame>,
}

/// Arena of frames for one interpreter run.
#[derive(Debug, Default)]
pub struct ContextStack {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl ContextStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a frame with no parent.
    pub fn push_root(&mut self) -> FrameId {
        self.allocate(None)
    }

    /// Allocate a frame whose materialized text starts with `parent`'s.
    pub fn push_child(&mut self, parent: FrameId) -> Result<FrameId, FrameError> {
        self.frame_mut(parent)?.live_children += 1;
        Ok(self.allocate(Some(parent)))
    }

    fn allocate(&mut self, parent: Option<FrameId>) -> FrameId {
        let frame = Frame {
            parent,
            items: Vec::new(),
            live_children: 0,
        };
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.frame = Some(frame);
            return FrameId {
                index,
                generation: slot.generation,
            };
        }
        let index = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
        self.slots.push(Slot {
            generation: 0,
            frame: Some(frame),
        });
        FrameId {
            index,
            generation: 0,
        }
    }

    fn frame(&self, id: FrameId) -> Result<&Frame, FrameError> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.frame.as_ref())
            .ok_or(FrameError::Released(id))
    }

    fn frame_mut(&mut self, id: FrameId) -> Result<&mut Frame, FrameError> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.frame.as_mut())
            .ok_or(FrameError::Released(id))
    }

    pub fn append(&mut self, id: FrameId, item: ContentItem) -> Result<(), FrameError> {
        self.frame_mut(id)?.items.push(item);
        Ok(())
    }

    /// Items owned by `id` itself, without its ancestors.
    pub fn own_items(&self, id: FrameId) -> Result<&[ContentItem], FrameError> {
        Ok(&self.frame(id)?.items)
    }

    pub fn parent(&self, id: FrameId) -> Result<Option<FrameId>, FrameError> {
        Ok(self.frame(id)?.parent)
    }

    /// Ancestors' items root-first, followed by the frame's own items.
    pub fn materialize(&self, id: FrameId) -> Result<Vec<ContentItem>, FrameError> {
        let mut chain = vec![self.frame(id)?];
        let mut cursor = chain[0].parent;
        while let Some(parent) = cursor {
            let frame = self.frame(parent)?;
            chain.push(frame);
            cursor = frame.parent;
        }
        let len = chain.iter().map(|f| f.items.len()).sum();
        let mut items = Vec::with_capacity(len);
        for frame in chain.iter().rev() {
            items.extend(frame.items.iter().cloned());
        }
        Ok(items)
    }

    /// Release a frame. Children must be released first.
    pub fn pop(&mut self, id: FrameId) -> Result<(), FrameError> {
        let frame = self.frame(id)?;
        if frame.live_children > 0 {
            return Err(FrameError::LiveChildren {
                frame: id,
                children: frame.live_children,
            });
        }
        let parent = frame.parent;
        let slot = &mut self.slots[id.index as usize];
        slot.frame = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.live -= 1;
        if let Some(parent) = parent {
            let parent = self.frame_mut(parent)?;
            parent.live_children -= 1;
        }
        Ok(())
    }

    #[inline]
    pub fn is_live(&self, id: FrameId) -> bool {
        self.frame(id).is_ok()
    }

    /// Number of frames allocated and not yet released.
    #[inline]
    pub fn live_count(&self) -> usize {
        self.live
    }
}
