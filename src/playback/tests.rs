use super::error::PlaybackError;
use super::session::DEFAULT_RESTART_THRESHOLD_SECS;
use super::ticker::Ticker;
use super::*;
use crate::catalog::{Catalog, Track, TrackId, sample_catalog};
use proptest::prelude::*;
use std::time::{Duration, Instant};

fn t(id: &str, secs: u32, favorite: bool) -> Track {
    Track {
        id: TrackId::new(id),
        title: format!("Song {id}"),
        artist: "Artist".into(),
        album: "Album".into(),
        cover: String::new(),
        duration_secs: secs,
        starts_favorite: favorite,
        color: "#123456".into(),
    }
}

fn catalog_of(durations: &[u32]) -> Catalog {
    let tracks = durations
        .iter()
        .enumerate()
        .map(|(i, &d)| t(&i.to_string(), d, false))
        .collect();
    Catalog::new(tracks, vec![]).unwrap()
}

fn session(n: usize) -> PlaybackSession {
    PlaybackSession::with_seed(catalog_of(&vec![100; n]), 7)
}

#[test]
fn new_session_starts_paused_at_first_track() {
    let s = PlaybackSession::with_seed(sample_catalog().unwrap(), 1);
    assert_eq!(s.current_index(), 0);
    assert_eq!(s.elapsed(), 0);
    assert!(!s.is_playing());
    assert!(!s.shuffled());
    assert!(!s.collapsed());
    assert_eq!(s.restart_threshold(), DEFAULT_RESTART_THRESHOLD_SECS);
    let favs: Vec<&str> = s.favorites().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(favs, vec!["Ocean Waves", "Cosmic Journey"]);
}

#[test]
fn select_track_sets_index_and_resets_elapsed() {
    let mut s = session(5);
    for i in 0..5 {
        s.seek(40);
        s.select_track(i).unwrap();
        assert_eq!(s.current_index(), i);
        assert_eq!(s.elapsed(), 0);
        assert!(!s.is_playing());
    }
}

#[test]
fn select_and_play_forces_playing() {
    let mut s = session(3);
    s.select_and_play(2).unwrap();
    assert_eq!(s.current_index(), 2);
    assert!(s.is_playing());

    // Already playing stays playing.
    s.select_and_play(1).unwrap();
    assert!(s.is_playing());
}

#[test]
fn invalid_index_is_rejected_without_mutation() {
    let mut s = session(3);
    s.select_track(1).unwrap();
    s.seek(10);

    let err = s.select_track(3).unwrap_err();
    assert_eq!(err, PlaybackError::InvalidIndex { index: 3, len: 3 });
    assert!(s.select_and_play(99).is_err());

    assert_eq!(s.current_index(), 1);
    assert_eq!(s.elapsed(), 10);
    assert!(!s.is_playing());
}

#[test]
fn toggle_play_pause_round_trips_without_touching_position() {
    let mut s = session(4);
    s.select_track(2).unwrap();
    s.seek(33);

    s.toggle_play_pause();
    assert!(s.is_playing());
    s.toggle_play_pause();
    assert!(!s.is_playing());

    assert_eq!(s.current_index(), 2);
    assert_eq!(s.elapsed(), 33);
}

#[test]
fn advance_cycles_through_the_catalog() {
    let mut s = session(5);
    s.select_track(3).unwrap();
    s.seek(12);

    s.advance();
    assert_eq!(s.current_index(), 4);
    assert_eq!(s.elapsed(), 0);
    s.advance();
    assert_eq!(s.current_index(), 0);

    for _ in 0..5 {
        s.advance();
    }
    assert_eq!(s.current_index(), 0);
}

#[test]
fn advance_keeps_transport() {
    let mut s = session(3);
    s.advance();
    assert!(!s.is_playing());
    s.set_playing(true);
    s.advance();
    assert!(s.is_playing());
}

#[test]
fn shuffled_advance_stays_in_range_and_resets_elapsed() {
    let mut s = session(5);
    s.set_shuffled(true);
    let mut seen = std::collections::HashSet::new();
    for _ in 0..200 {
        s.seek(50);
        s.advance();
        assert!(s.current_index() < 5);
        assert_eq!(s.elapsed(), 0);
        seen.insert(s.current_index());
    }
    // 200 uniform draws over 5 slots hit all of them.
    assert_eq!(seen.len(), 5);
}

#[test]
fn shuffled_advance_is_deterministic_for_a_seed() {
    let mut a = PlaybackSession::with_seed(catalog_of(&[10; 8]), 42);
    let mut b = PlaybackSession::with_seed(catalog_of(&[10; 8]), 42);
    a.set_shuffled(true);
    b.set_shuffled(true);
    for _ in 0..20 {
        a.advance();
        b.advance();
        assert_eq!(a.current_index(), b.current_index());
    }
}

#[test]
fn retreat_restarts_after_threshold() {
    let mut s = session(5);
    s.select_track(2).unwrap();
    s.seek(6);
    s.retreat();
    assert_eq!(s.current_index(), 2);
    assert_eq!(s.elapsed(), 0);
}

#[test]
fn retreat_goes_back_near_track_start() {
    let mut s = session(5);
    s.select_track(2).unwrap();
    s.seek(3);
    s.retreat();
    assert_eq!(s.current_index(), 1);
    assert_eq!(s.elapsed(), 0);

    // Exactly at the threshold still goes back.
    s.seek(5);
    s.retreat();
    assert_eq!(s.current_index(), 0);

    s.retreat();
    assert_eq!(s.current_index(), 4);
}

#[test]
fn retreat_ignores_shuffle() {
    let mut s = session(5);
    s.set_shuffled(true);
    s.select_track(3).unwrap();
    s.retreat();
    assert_eq!(s.current_index(), 2);
}

#[test]
fn restart_threshold_is_configurable() {
    let mut s = session(3).with_restart_threshold(10);
    s.select_track(1).unwrap();
    s.seek(8);
    s.retreat();
    assert_eq!(s.current_index(), 0);
}

#[test]
fn seek_clamps_to_track_duration() {
    let mut s = PlaybackSession::with_seed(catalog_of(&[245, 100]), 0);
    s.seek(120);
    assert_eq!(s.elapsed(), 120);
    s.seek(10_000);
    assert_eq!(s.elapsed(), 245);
    s.seek(0);
    assert_eq!(s.elapsed(), 0);
    assert_eq!(s.current_index(), 0);
}

#[test]
fn seek_by_clamps_both_ends() {
    let mut s = PlaybackSession::with_seed(catalog_of(&[30]), 0);
    s.seek_by(-5);
    assert_eq!(s.elapsed(), 0);
    s.seek_by(12);
    assert_eq!(s.elapsed(), 12);
    s.seek_by(100);
    assert_eq!(s.elapsed(), 30);
    s.seek_by(-7);
    assert_eq!(s.elapsed(), 23);
}

#[test]
fn remaining_and_progress_follow_elapsed() {
    let mut s = PlaybackSession::with_seed(catalog_of(&[200]), 0);
    s.seek(50);
    assert_eq!(s.remaining(), 150);
    assert!((s.progress() - 0.25).abs() < f64::EPSILON);
}

#[test]
fn setters_have_no_side_effects() {
    let mut s = session(3);
    s.select_track(1).unwrap();
    s.seek(9);
    s.set_shuffled(true);
    s.set_collapsed(true);
    assert!(s.shuffled());
    assert!(s.collapsed());
    assert_eq!(s.current_index(), 1);
    assert_eq!(s.elapsed(), 9);
    assert!(!s.is_playing());
}

#[test]
fn toggle_favorite_round_trips_flag_and_derived_list() {
    let mut s = PlaybackSession::with_seed(sample_catalog().unwrap(), 0);
    let id = TrackId::new("1");
    let before: Vec<TrackId> = s.favorites().iter().map(|t| t.id.clone()).collect();

    assert_eq!(s.toggle_favorite(&id), Ok(true));
    assert!(s.is_favorite(&id));
    let during: Vec<&str> = s.favorites().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(during, vec!["1", "2", "4"]);

    assert_eq!(s.toggle_favorite(&id), Ok(false));
    let after: Vec<TrackId> = s.favorites().iter().map(|t| t.id.clone()).collect();
    assert_eq!(before, after);
}

#[test]
fn toggle_favorite_unknown_id_is_ignored() {
    let mut s = PlaybackSession::with_seed(sample_catalog().unwrap(), 0);
    let before = s.favorites().len();
    let err = s.toggle_favorite(&TrackId::new("nope")).unwrap_err();
    assert_eq!(err, PlaybackError::UnknownTrackId(TrackId::new("nope")));
    assert_eq!(s.favorites().len(), before);
}

#[test]
fn play_track_finds_by_id() {
    let mut s = PlaybackSession::with_seed(sample_catalog().unwrap(), 0);
    s.play_track(&TrackId::new("4")).unwrap();
    assert_eq!(s.current_index(), 3);
    assert!(s.is_playing());

    assert!(s.play_track(&TrackId::new("missing")).is_err());
    assert_eq!(s.current_index(), 3);
}

#[test]
fn tick_is_idle_while_paused() {
    let mut s = session(2);
    assert_eq!(s.tick(), TickOutcome::Idle);
    assert_eq!(s.elapsed(), 0);
}

#[test]
fn full_track_of_ticks_advances_exactly_once() {
    let mut s = PlaybackSession::with_seed(catalog_of(&[245, 100, 100]), 0);
    s.set_playing(true);

    let mut advances = 0;
    for n in 1..=245u32 {
        match s.tick() {
            TickOutcome::Elapsed(e) => assert_eq!(e, n),
            TickOutcome::Advanced { from, to } => {
                assert_eq!(n, 245);
                assert_eq!((from, to), (0, 1));
                advances += 1;
            }
            TickOutcome::Idle => panic!("playing session should not idle"),
        }
    }

    assert_eq!(advances, 1);
    assert_eq!(s.current_index(), 1);
    assert_eq!(s.elapsed(), 0);
    assert!(s.is_playing());
}

#[test]
fn tick_after_seek_to_end_advances() {
    let mut s = PlaybackSession::with_seed(catalog_of(&[10, 10]), 0);
    s.set_playing(true);
    s.seek(10);
    assert_eq!(s.tick(), TickOutcome::Advanced { from: 0, to: 1 });
    assert_eq!(s.elapsed(), 0);
}

#[test]
fn tick_at_end_of_longest_possible_track_advances() {
    let mut s = PlaybackSession::with_seed(catalog_of(&[u32::MAX, 10]), 0);
    s.select_and_play(0).unwrap();
    s.seek(u32::MAX);
    assert_eq!(s.elapsed(), u32::MAX);
    assert_eq!(s.tick(), TickOutcome::Advanced { from: 0, to: 1 });
    assert_eq!(s.elapsed(), 0);
}

#[test]
fn apply_routes_commands() {
    let mut s = PlaybackSession::with_seed(sample_catalog().unwrap(), 0);
    s.apply(PlayerCmd::SelectAndPlay(2)).unwrap();
    s.apply(PlayerCmd::Seek(30)).unwrap();
    s.apply(PlayerCmd::SeekBy(-10)).unwrap();
    assert_eq!((s.current_index(), s.elapsed(), s.is_playing()), (2, 20, true));

    s.apply(PlayerCmd::Prev).unwrap();
    assert_eq!((s.current_index(), s.elapsed()), (2, 0));
    s.apply(PlayerCmd::Prev).unwrap();
    assert_eq!(s.current_index(), 1);
    s.apply(PlayerCmd::Next).unwrap();
    assert_eq!(s.current_index(), 2);

    s.apply(PlayerCmd::SetPlaying(false)).unwrap();
    s.apply(PlayerCmd::TogglePlayPause).unwrap();
    assert!(s.is_playing());

    s.apply(PlayerCmd::SetShuffled(true)).unwrap();
    s.apply(PlayerCmd::SetCollapsed(true)).unwrap();
    assert!(s.shuffled() && s.collapsed());

    s.apply(PlayerCmd::ToggleFavorite(TrackId::new("3"))).unwrap();
    assert!(s.is_favorite(&TrackId::new("3")));

    assert!(s.apply(PlayerCmd::Select(5)).is_err());
    assert!(s.apply(PlayerCmd::ToggleFavorite(TrackId::new("x"))).is_err());
    s.apply(PlayerCmd::Select(0)).unwrap();
    s.apply(PlayerCmd::PlayTrack(TrackId::new("5"))).unwrap();
    assert_eq!(s.current_index(), 4);
}

#[test]
fn ticker_starts_once_and_stops_cleanly() {
    let t0 = Instant::now();
    let mut ticker = Ticker::new(Duration::from_secs(1));
    assert!(!ticker.is_running());
    assert!(!ticker.poll(t0 + Duration::from_secs(5)));

    ticker.start(t0);
    ticker.start(t0 + Duration::from_millis(700));
    assert_eq!(ticker.deadline(), Some(t0 + Duration::from_secs(1)));

    assert!(!ticker.poll(t0 + Duration::from_millis(999)));
    assert!(ticker.poll(t0 + Duration::from_secs(1)));
    assert!(!ticker.poll(t0 + Duration::from_millis(1500)));
    assert_eq!(ticker.deadline(), Some(t0 + Duration::from_secs(2)));

    ticker.stop();
    assert!(!ticker.is_running());
    assert!(!ticker.poll(t0 + Duration::from_secs(10)));
}

#[test]
fn ticker_fires_once_per_poll_and_drops_missed_ticks() {
    let t0 = Instant::now();
    let mut ticker = Ticker::new(Duration::from_secs(1));
    ticker.start(t0);

    let late = t0 + Duration::from_millis(3500);
    assert!(ticker.poll(late));
    assert!(!ticker.poll(late));
    assert_eq!(ticker.deadline(), Some(late + Duration::from_secs(1)));
}

#[test]
fn player_ties_ticker_to_transport() {
    let t0 = Instant::now();
    let mut p = Player::new(session(3), Duration::from_secs(1));
    assert!(p.next_deadline().is_none());

    p.send(PlayerCmd::TogglePlayPause, t0).unwrap();
    assert_eq!(p.next_deadline(), Some(t0 + Duration::from_secs(1)));

    // Changing track while playing keeps the existing schedule.
    p.send(PlayerCmd::Next, t0 + Duration::from_millis(400)).unwrap();
    assert_eq!(p.next_deadline(), Some(t0 + Duration::from_secs(1)));

    p.send(PlayerCmd::TogglePlayPause, t0 + Duration::from_millis(500)).unwrap();
    assert!(p.next_deadline().is_none());
    assert_eq!(p.poll_tick(t0 + Duration::from_secs(3)), None);
    assert_eq!(p.session().elapsed(), 0);
}

#[test]
fn player_rejected_command_keeps_ticker_state() {
    let t0 = Instant::now();
    let mut p = Player::new(session(2), Duration::from_secs(1));
    p.send(PlayerCmd::SetPlaying(true), t0).unwrap();
    assert!(p.send(PlayerCmd::SelectAndPlay(9), t0).is_err());
    assert!(p.ticker().is_running());
    assert!(p.session().is_playing());
}

#[test]
fn player_ticks_through_a_track_end() {
    let t0 = Instant::now();
    let mut p = Player::new(
        PlaybackSession::with_seed(catalog_of(&[3, 3]), 0),
        Duration::from_secs(1),
    );
    p.send(PlayerCmd::SetPlaying(true), t0).unwrap();

    let outcomes: Vec<TickOutcome> = (1..=3)
        .filter_map(|s| p.poll_tick(t0 + Duration::from_secs(s)))
        .collect();
    assert_eq!(
        outcomes,
        vec![
            TickOutcome::Elapsed(1),
            TickOutcome::Elapsed(2),
            TickOutcome::Advanced { from: 0, to: 1 },
        ]
    );
    assert!(p.ticker().is_running());
}

#[derive(Debug, Clone)]
enum Op {
    Select(usize),
    SelectAndPlay(usize),
    Toggle,
    Next,
    Prev,
    Seek(u32),
    SeekBy(i64),
    Shuffle(bool),
    Tick,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..12).prop_map(Op::Select),
        (0usize..12).prop_map(Op::SelectAndPlay),
        Just(Op::Toggle),
        Just(Op::Next),
        Just(Op::Prev),
        (0u32..700).prop_map(Op::Seek),
        (-700i64..700).prop_map(Op::SeekBy),
        any::<bool>().prop_map(Op::Shuffle),
        Just(Op::Tick),
    ]
}

proptest! {
    #[test]
    fn elapsed_never_exceeds_duration(
        durations in prop::collection::vec(1u32..600, 1..10),
        ops in prop::collection::vec(op(), 1..200),
        seed in any::<u64>(),
    ) {
        let n = durations.len();
        let mut s = PlaybackSession::with_seed(catalog_of(&durations), seed);
        for op in ops {
            match op {
                Op::Select(i) => { let _ = s.select_track(i); }
                Op::SelectAndPlay(i) => { let _ = s.select_and_play(i); }
                Op::Toggle => s.toggle_play_pause(),
                Op::Next => s.advance(),
                Op::Prev => s.retreat(),
                Op::Seek(t) => s.seek(t),
                Op::SeekBy(d) => s.seek_by(d),
                Op::Shuffle(b) => s.set_shuffled(b),
                Op::Tick => { s.tick(); }
            }
            prop_assert!(s.current_index() < n);
            prop_assert!(s.elapsed() <= s.current_track().duration_secs);
        }
    }

    #[test]
    fn unshuffled_advance_returns_after_n_steps(
        n in 1usize..20,
        start in 0usize..20,
    ) {
        let start = start % n;
        let mut s = PlaybackSession::with_seed(catalog_of(&vec![30; n]), 0);
        s.select_track(start).unwrap();
        for step in 1..=n {
            s.advance();
            prop_assert_eq!(s.current_index(), (start + step) % n);
        }
        prop_assert_eq!(s.current_index(), start);
    }
}
