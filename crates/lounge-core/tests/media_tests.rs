// Media element lifecycle: one active element, previous one released first.

use lounge_core::{LoungeError, MediaElement, MediaKind, MediaSlot};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default, Debug)]
struct Calls {
    paused: Vec<u32>,
    detached: Vec<u32>,
}

struct Mock {
    id: u32,
    kind: MediaKind,
    calls: Rc<RefCell<Calls>>,
}

impl MediaElement for Mock {
    fn kind(&self) -> MediaKind {
        self.kind
    }

    fn pause(&mut self) {
        self.calls.borrow_mut().paused.push(self.id);
    }

    fn detach(&mut self) {
        self.calls.borrow_mut().detached.push(self.id);
    }
}

fn mock(id: u32, kind: MediaKind, calls: &Rc<RefCell<Calls>>) -> Mock {
    Mock {
        id,
        kind,
        calls: calls.clone(),
    }
}

#[test]
fn switching_files_leaves_one_active_element() {
    let calls = Rc::new(RefCell::new(Calls::default()));
    let mut slot = MediaSlot::default();

    slot.replace_with(|| Ok::<_, ()>(mock(1, MediaKind::Audio, &calls)))
        .unwrap();
    assert!(calls.borrow().paused.is_empty());

    slot.replace_with(|| Ok::<_, ()>(mock(2, MediaKind::Video, &calls)))
        .unwrap();
    assert_eq!(slot.kind(), Some(MediaKind::Video));
    assert_eq!(calls.borrow().paused, vec![1]);
    assert_eq!(calls.borrow().detached, vec![1]);
}

#[test]
fn previous_element_is_released_before_the_next_is_built() {
    let calls = Rc::new(RefCell::new(Calls::default()));
    let mut slot = MediaSlot::default();
    slot.replace_with(|| Ok::<_, ()>(mock(1, MediaKind::Audio, &calls)))
        .unwrap();

    let probe = calls.clone();
    slot.replace_with(|| {
        // by now the old element must already be detached
        assert_eq!(probe.borrow().detached, vec![1]);
        Ok::<_, ()>(mock(2, MediaKind::Audio, &calls))
    })
    .unwrap();
}

#[test]
fn failed_construction_leaves_the_slot_empty() {
    let calls = Rc::new(RefCell::new(Calls::default()));
    let mut slot = MediaSlot::default();
    slot.replace_with(|| Ok::<_, &str>(mock(1, MediaKind::Audio, &calls)))
        .unwrap();

    let err = slot
        .replace_with(|| Err::<Mock, _>("decode failed"))
        .err();
    assert_eq!(err, Some("decode failed"));
    assert!(!slot.is_active());
    assert_eq!(calls.borrow().detached, vec![1]);
}

#[test]
fn teardown_on_empty_slot_is_a_no_op() {
    let mut slot: MediaSlot<Mock> = MediaSlot::default();
    assert!(!slot.teardown());
}

#[test]
fn media_kinds_from_mime() {
    assert_eq!(MediaKind::from_mime("audio/mpeg"), Ok(MediaKind::Audio));
    assert_eq!(MediaKind::from_mime("video/webm"), Ok(MediaKind::Video));
    assert_eq!(
        MediaKind::from_mime("image/png"),
        Err(LoungeError::UnsupportedMedia("image/png".into()))
    );
}
