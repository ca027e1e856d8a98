use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    io::{Cursor, ErrorKind},
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};

use viewer_image::{FileSource, ProbeOutcome};
use viewer_session::Session;
use viewer_types::{Effect, ViewerEvent};

const GOOD: &[u8] = b"P2\n# comment\n2 2\n255\n0 128\n255 64\n";
const OTHER: &[u8] = b"P2\n1 1\n255\n7\n";
const BROKEN: &[u8] = b"P5\n1 1\n255\n\x07";
const TRUNCATED: &[u8] = b"P2\n2 2\n255\n1 2 3\n";

struct FakeFile {
    mtime: SystemTime,
    contents: Vec<u8>,
    busy: bool,
}

/// In-memory filesystem that counts how often files are opened.
#[derive(Default)]
struct FakeSource {
    files: RefCell<HashMap<PathBuf, FakeFile>>,
    opens: Cell<usize>,
}

impl FakeSource {
    fn write(&self, path: &str, secs: u64, contents: &[u8]) {
        self.files.borrow_mut().insert(
            PathBuf::from(path),
            FakeFile {
                mtime: SystemTime::UNIX_EPOCH + Duration::from_secs(secs),
                contents: contents.to_vec(),
                busy: false,
            },
        );
    }

    fn set_busy(&self, path: &str, busy: bool) {
        if let Some(file) = self.files.borrow_mut().get_mut(Path::new(path)) {
            file.busy = busy;
        }
    }

    fn remove(&self, path: &str) {
        self.files.borrow_mut().remove(Path::new(path));
    }

    fn opens(&self) -> usize {
        self.opens.get()
    }
}

impl FileSource for FakeSource {
    type Reader = Cursor<Vec<u8>>;

    fn modified(&self, path: &Path) -> std::io::Result<SystemTime> {
        self.files
            .borrow()
            .get(path)
            .map(|file| file.mtime)
            .ok_or_else(|| ErrorKind::NotFound.into())
    }

    fn probe(&self, path: &Path) -> ProbeOutcome {
        match self.files.borrow().get(path) {
            Some(file) if file.busy => ProbeOutcome::Busy,
            Some(_) => ProbeOutcome::Ready,
            None => ProbeOutcome::Missing,
        }
    }

    fn open(&self, path: &Path) -> std::io::Result<Self::Reader> {
        self.opens.set(self.opens.get() + 1);
        self.files
            .borrow()
            .get(path)
            .map(|file| Cursor::new(file.contents.clone()))
            .ok_or_else(|| ErrorKind::NotFound.into())
    }
}

fn open(session: &mut Session<FakeSource>, path: &str) {
    session.handle(ViewerEvent::Open(PathBuf::from(path)));
}

fn drop_files(session: &mut Session<FakeSource>, paths: &[&str]) {
    session.handle(ViewerEvent::Drop(paths.iter().map(PathBuf::from).collect()));
}

fn has_error(effects: &[Effect]) -> bool {
    effects.iter().any(|effect| effect.error_message().is_some())
}

#[test]
fn test_first_tick_loads_target() {
    let source = FakeSource::default();
    source.write("a.pgm", 10, GOOD);
    let mut session = Session::new(source);
    open(&mut session, "a.pgm");

    let effects = session.handle(ViewerEvent::Tick);
    assert_eq!(
        effects,
        vec![Effect::Redraw, Effect::SetTitle(PathBuf::from("a.pgm"))]
    );

    let image = session.image().unwrap();
    assert_eq!((image.width(), image.height()), (2, 2));
    assert_eq!(image.scanline(0), Some(&[255, 255, 255, 64, 64, 64][..]));
    assert!(session.load_state().is_ready());

    let watch = session.watch_state();
    assert_eq!(watch.loaded(), Some(Path::new("a.pgm")));
    assert_eq!(
        watch.loaded_mtime(),
        Some(SystemTime::UNIX_EPOCH + Duration::from_secs(10))
    );
}

#[test]
fn test_unchanged_file_is_not_reloaded() {
    let source = FakeSource::default();
    source.write("a.pgm", 10, GOOD);
    let mut session = Session::new(source);
    open(&mut session, "a.pgm");

    session.handle(ViewerEvent::Tick);
    assert_eq!(session.source().opens(), 1);

    assert!(session.handle(ViewerEvent::Tick).is_empty());
    assert!(session.handle(ViewerEvent::Tick).is_empty());
    assert_eq!(session.source().opens(), 1);
}

#[test]
fn test_newer_mtime_triggers_reload() {
    let source = FakeSource::default();
    source.write("a.pgm", 10, GOOD);
    let mut session = Session::new(source);
    open(&mut session, "a.pgm");
    session.handle(ViewerEvent::Tick);

    session.source().write("a.pgm", 11, OTHER);
    let effects = session.handle(ViewerEvent::Tick);

    assert!(effects.contains(&Effect::Redraw));
    assert_eq!(session.source().opens(), 2);
    assert_eq!(session.image().unwrap().sample(0, 0), Some(7));
}

#[test]
fn test_older_mtime_is_ignored() {
    let source = FakeSource::default();
    source.write("a.pgm", 10, GOOD);
    let mut session = Session::new(source);
    open(&mut session, "a.pgm");
    session.handle(ViewerEvent::Tick);

    session.source().write("a.pgm", 9, OTHER);
    assert!(session.handle(ViewerEvent::Tick).is_empty());
    assert_eq!(session.image().unwrap().width(), 2);
}

#[test]
fn test_busy_file_is_retried_silently() {
    let source = FakeSource::default();
    source.write("a.pgm", 10, GOOD);
    source.set_busy("a.pgm", true);
    let mut session = Session::new(source);
    open(&mut session, "a.pgm");

    assert!(session.handle(ViewerEvent::Tick).is_empty());
    assert!(session.handle(ViewerEvent::Tick).is_empty());
    assert_eq!(session.source().opens(), 0);
    assert!(session.load_state().is_idle());

    session.source().set_busy("a.pgm", false);
    let effects = session.handle(ViewerEvent::Tick);
    assert!(effects.contains(&Effect::Redraw));
    assert!(session.image().is_some());
}

#[test]
fn test_failure_keeps_previous_image_and_reports_once() {
    let source = FakeSource::default();
    source.write("a.pgm", 10, GOOD);
    let mut session = Session::new(source);
    open(&mut session, "a.pgm");
    session.handle(ViewerEvent::Tick);
    let shown = session.image().cloned();

    session.source().write("a.pgm", 20, TRUNCATED);
    let effects = session.handle(ViewerEvent::Tick);
    assert_eq!(
        effects,
        vec![Effect::ShowError("a.pgm: invalid PGM file".to_string())]
    );
    assert!(session.load_state().is_failed());
    assert_eq!(session.image().cloned(), shown);

    // Sticky: no retries, no repeated dialogs, even if the file changes again
    session.source().write("a.pgm", 30, GOOD);
    for _ in 0..5 {
        assert!(session.handle(ViewerEvent::Tick).is_empty());
    }
    assert_eq!(session.source().opens(), 2);
}

#[test]
fn test_bad_magic_never_installs_buffer() {
    let source = FakeSource::default();
    source.write("bad.pgm", 10, BROKEN);
    let mut session = Session::new(source);
    open(&mut session, "bad.pgm");

    let effects = session.handle(ViewerEvent::Tick);
    assert!(has_error(&effects));
    assert!(session.image().is_none());
    assert!(session.watch_state().loaded().is_none());
}

#[test]
fn test_missing_dropped_file_sets_error_without_crash() {
    let mut session = Session::new(FakeSource::default());
    drop_files(&mut session, &["ghost.pgm"]);

    let effects = session.handle(ViewerEvent::Tick);
    assert_eq!(
        effects,
        vec![Effect::ShowError("ghost.pgm: invalid PGM file".to_string())]
    );
    assert!(session.load_state().is_failed());
    assert!(session.image().is_none());
    assert_eq!(session.source().opens(), 0);

    assert!(session.handle(ViewerEvent::Tick).is_empty());
}

#[test]
fn test_file_deleted_after_load_keeps_image() {
    let source = FakeSource::default();
    source.write("a.pgm", 10, GOOD);
    let mut session = Session::new(source);
    open(&mut session, "a.pgm");
    session.handle(ViewerEvent::Tick);

    session.source().remove("a.pgm");
    let effects = session.handle(ViewerEvent::Tick);
    assert!(has_error(&effects));
    assert!(session.image().is_some());
}

#[test]
fn test_drop_selects_first_and_navigation_wraps() {
    let source = FakeSource::default();
    for (name, secs) in [("a.pgm", 1), ("b.pgm", 2), ("c.pgm", 3)] {
        source.write(name, secs, GOOD);
    }
    let mut session = Session::new(source);
    drop_files(&mut session, &["a.pgm", "b.pgm", "c.pgm"]);
    assert_eq!(session.target(), Some(Path::new("a.pgm")));

    session.handle(ViewerEvent::Prev);
    assert_eq!(session.target(), Some(Path::new("c.pgm")));
    assert_eq!(session.files().index(), Some(2));

    session.handle(ViewerEvent::Next);
    assert_eq!(session.target(), Some(Path::new("a.pgm")));

    session.handle(ViewerEvent::Next);
    let effects = session.handle(ViewerEvent::Tick);
    assert_eq!(
        effects,
        vec![Effect::Redraw, Effect::SetTitle(PathBuf::from("b.pgm"))]
    );
}

#[test]
fn test_navigation_clears_error_and_retries() {
    let source = FakeSource::default();
    source.write("bad.pgm", 1, BROKEN);
    source.write("good.pgm", 1, GOOD);
    let mut session = Session::new(source);
    drop_files(&mut session, &["bad.pgm", "good.pgm"]);

    assert!(has_error(&session.handle(ViewerEvent::Tick)));

    session.handle(ViewerEvent::Next);
    assert!(session.load_state().is_idle());
    assert!(session.handle(ViewerEvent::Tick).contains(&Effect::Redraw));

    // Returning to the broken file attempts a fresh decode and reports again
    session.handle(ViewerEvent::Prev);
    let effects = session.handle(ViewerEvent::Tick);
    assert!(has_error(&effects));
    assert_eq!(session.image().unwrap().width(), 2);
}

#[test]
fn test_navigation_without_files_is_noop() {
    let source = FakeSource::default();
    source.write("a.pgm", 1, GOOD);
    let mut session = Session::new(source);

    session.handle(ViewerEvent::Next);
    session.handle(ViewerEvent::Prev);
    assert!(session.target().is_none());
}

#[test]
fn test_new_drop_replaces_file_set() {
    let mut session = Session::new(FakeSource::default());
    drop_files(&mut session, &["a.pgm", "b.pgm", "c.pgm"]);
    session.handle(ViewerEvent::Next);

    drop_files(&mut session, &["x.pgm", "y.pgm"]);
    assert_eq!(session.files().total(), 2);
    assert_eq!(session.files().index(), Some(0));
    assert_eq!(session.target(), Some(Path::new("x.pgm")));
}

#[test]
fn test_switching_back_to_loaded_path_reloads() {
    let source = FakeSource::default();
    source.write("a.pgm", 1, GOOD);
    source.write("b.pgm", 1, OTHER);
    let mut session = Session::new(source);
    drop_files(&mut session, &["a.pgm", "b.pgm"]);

    session.handle(ViewerEvent::Tick);
    session.handle(ViewerEvent::Next);
    session.handle(ViewerEvent::Tick);
    session.handle(ViewerEvent::Prev);
    session.handle(ViewerEvent::Tick);

    assert_eq!(session.source().opens(), 3);
    assert_eq!(session.image().unwrap().width(), 2);
}
