use amcat::engine::EventLog;
use amcat::{EventKind, Scheduler, SchedulerConfig};

fn run(data: &[u8], config: SchedulerConfig) -> (Vec<u8>, String, EventLog) {
    let mut log = EventLog::new();
    let mut out = Vec::new();
    let mut diag = Vec::new();
    {
        let mut scheduler = Scheduler::new(config).with_sink(&mut log);
        scheduler.process_stream(data, &mut out, &mut diag).unwrap();
        scheduler.finish().unwrap();
        scheduler.summarize(&mut diag).unwrap();
    }
    (out, String::from_utf8(diag).unwrap(), log)
}

#[test]
fn passthrough_is_byte_exact_around_music() {
    let art = b"\x1b[0;1;34m\xdc\xdf\xdb ANSI \x1b[40m\r\n";
    let mut data = art.to_vec();
    data.extend_from_slice(b"\x1b[MF T180 O5 L8 CEG>C\x1b[0m");
    data.extend_from_slice(art);
    data.extend_from_slice(b"\x1b[?25lMFV1 L2 C\x1b[0m\n");

    let (out, _, log) = run(&data, SchedulerConfig::default());

    let mut expected = art.to_vec();
    expected.extend_from_slice(b"\x1b[0m");
    expected.extend_from_slice(art);
    expected.extend_from_slice(b"\x1b[0m\n");
    assert_eq!(out, expected);
    assert_eq!(log.batches.len(), 2);
    assert!(log.finished);
}

#[test]
fn simple_melody_times() {
    let (_, _, log) = run(b"\x1b[MF T120 L4 CDEFG", SchedulerConfig::default());
    let ons: Vec<(f64, u8)> = log
        .events()
        .filter(|e| e.kind == EventKind::NoteOn)
        .map(|e| (e.time, e.pitch))
        .collect();
    assert_eq!(
        ons,
        vec![(0.0, 60), (0.5, 62), (1.0, 64), (1.5, 65), (2.0, 67)]
    );
}

#[test]
fn voices_in_one_block_start_together() {
    let (_, _, log) = run(b"\x1b[MF V1 O5 L16 C V2 O3 L16 C", SchedulerConfig::default());
    let events: Vec<_> = log.events().copied().collect();
    assert_eq!(events.len(), 4);
    assert_eq!((events[0].voice, events[0].pitch, events[0].time), (1, 72, 0.0));
    assert_eq!((events[2].voice, events[2].pitch, events[2].time), (2, 48, 0.0));
    assert!((events[1].time - 0.125).abs() < 1e-12);
}

#[test]
fn later_blocks_wait_for_earlier_ones() {
    let data = b"\x1b[MF T60 L4 C\x1b[0m\x1b[MF T60 L4 D\x1b[0m\x1b[MF T60 L4 E";
    let (_, _, log) = run(data, SchedulerConfig::default());
    let ons: Vec<f64> = log
        .events()
        .filter(|e| e.is_note_on())
        .map(|e| e.time)
        .collect();
    assert_eq!(ons, vec![0.0, 1.0, 2.0]);
    let offsets: Vec<f64> = log.batches.iter().map(|b| b.1).collect();
    assert_eq!(offsets, vec![0.0, 1.0, 2.0]);
}

#[test]
fn garbage_in_payload_is_skipped() {
    let (out, _, log) = run(b"\x1b[MF !!T zz L4 C ?? Q", SchedulerConfig::default());
    assert!(out.is_empty());
    let pitches: Vec<u8> = log.events().map(|e| e.pitch).collect();
    assert_eq!(pitches, vec![60, 60]);
}

#[test]
fn verbose_lines_and_summary_go_to_diagnostics() {
    let config = SchedulerConfig {
        verbose: true,
        summary: true,
        ..Default::default()
    };
    let data = b"intro\x1b[MF T100 C\x1b[0m\x1b[MF\x1b[0mend";
    let (out, diag, _) = run(data, config);

    assert_eq!(out, b"intro\x1b[0m\x1b[0mend".to_vec());
    let lines: Vec<&str> = diag.lines().collect();
    assert_eq!(
        lines[0],
        "[block 0] notes=1 events=2 duration=0.300s voices=[0] tempos=[100]"
    );
    assert_eq!(
        lines[1],
        "[block 1] notes=0 events=0 duration=0.000s voices=[0] tempos=(default)"
    );
    assert!(diag.contains("--- ANSI Music Summary ---"));
    assert!(diag.contains("Blocks:     2\n"));
    assert!(diag.contains("Tempo:      100\u{2013}100 bpm (avg 100.00)\n"));
}

#[test]
fn stream_without_music_has_empty_summary() {
    let config = SchedulerConfig {
        summary: true,
        ..Default::default()
    };
    let (out, diag, log) = run(b"plain text only", config);
    assert_eq!(out, b"plain text only".to_vec());
    assert!(log.batches.is_empty());
    assert!(diag.contains("Blocks:     0\n"));
    assert!(diag.contains("Polyphony:  0.000 avg | 0 max\n"));
    assert!(!diag.contains("Polyphony over time"));
}
