use super::*;

#[test]
fn hidden_in_quiet_mode_still_counts() {
    let progress = ScanProgress::new(100, true);
    progress.inc();
    progress.inc();
    progress.finish();

    assert_eq!(progress.position(), 2);
}

#[test]
fn clones_share_the_counter() {
    let progress = ScanProgress::new(100, true);
    let cloned = progress.clone();

    progress.inc();
    cloned.inc();

    assert_eq!(progress.position(), 2);
    progress.finish();
}

#[test]
fn visible_bar_can_be_driven_without_tty() {
    let progress = ScanProgress::new_with_visibility(3, false, true);
    for _ in 0..3 {
        progress.inc();
    }
    progress.finish();

    assert_eq!(progress.position(), 3);
}

#[test]
fn hidden_when_not_a_tty() {
    let progress = ScanProgress::new_with_visibility(3, false, false);
    progress.inc();

    assert!(progress.progress_bar.is_hidden());
}
