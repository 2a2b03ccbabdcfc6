use std::{
    alloc::{GlobalAlloc, Layout, System},
    cell::Cell,
};

use fuse_settings::core::{apply_overrides, set_string, Settings};

// Tracks the bytes currently allocated by each thread, so tests running alongside don't interfere
struct Counting;

thread_local! {
    static LIVE: Cell<isize> = const { Cell::new(0) };
}

fn track(delta: isize) {
    let _ = LIVE.try_with(|live| live.set(live.get() + delta));
}

unsafe impl GlobalAlloc for Counting {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc(layout);
        if !ptr.is_null() {
            track(layout.size() as isize);
        }
        ptr
    }
    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout);
        track(-(layout.size() as isize));
    }
    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new = System.realloc(ptr, layout, new_size);
        if !new.is_null() {
            track(new_size as isize - layout.size() as isize);
        }
        new
    }
}

#[global_allocator]
static ALLOCATOR: Counting = Counting;

fn live() -> isize {
    LIVE.with(|live| live.get())
}

#[test]
fn test_reset_releases_strings() {
    let mut settings = Settings::default();
    let baseline = live();
    for i in 0..100 {
        let name = format!("tape-{}.tzx", i);
        set_string(&mut settings.tape_file, Some(&name)).unwrap();
        set_string(&mut settings.start_machine, Some("pentagon1024")).unwrap();
        set_string(&mut settings.rom_48_0, None).unwrap();
        drop(name);
        settings.reset_to_defaults();
    }
    assert_eq!(live(), baseline);
}

#[test]
fn test_copies_release_strings() {
    let mut settings = Settings::default();
    settings.snapshot = Some("saved.szx".to_string());
    let baseline = live();
    {
        let copy = settings.clone();
        let mut other = Settings::default();
        other.dck_file = Some("cart.dck".to_string());
        other.copy_from(&copy);
        other.copy_from(&settings);
        assert_eq!(other, settings);
    }
    assert_eq!(live(), baseline);
}

#[test]
fn test_overrides_release_replaced_strings() {
    let mut settings = Settings::default();
    let baseline = live();
    for _ in 0..10 {
        let warnings = apply_overrides(
            &mut settings,
            [("machine", "128"), ("tape", "a.tzx"), ("tape", "b.tzx"), ("bogus", "1")],
        );
        assert_eq!(warnings.len(), 1);
        drop(warnings);
        settings.reset_to_defaults();
    }
    assert_eq!(live(), baseline);
}
