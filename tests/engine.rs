mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use meshact::{Engine, EngineError, Event, SpawnOptions};

#[test]
fn spawn_with_options_does_not_panic() {
    common::init();
    let engine = Engine::new();
    let pid = engine
        .spawn_func(
            |_ctx| {},
            "foo",
            SpawnOptions::new()
                .inbox_size(99)
                .max_restarts(1)
                .tags(["1", "2", "bar"]),
        )
        .unwrap();
    engine.send(&pid, 1i32);
    std::thread::sleep(Duration::from_millis(50));
}

#[test]
fn lifecycle_init_start_order() {
    common::init();
    let engine = Engine::new();
    let order: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));
    let (tx, rx) = crossbeam_channel::bounded(1);

    let order_for_closure = order.clone();
    let pid = engine
        .spawn_func(
            move |ctx| {
                use meshact::SystemMessage;
                if let Some(sys) = ctx.message_as::<SystemMessage>() {
                    match sys {
                        SystemMessage::Initialized => order_for_closure.lock().unwrap().push("initialized"),
                        SystemMessage::Started => order_for_closure.lock().unwrap().push("started"),
                        SystemMessage::Stopped => order_for_closure.lock().unwrap().push("stopped"),
                    }
                } else if ctx.message_as::<i32>().is_some() {
                    order_for_closure.lock().unwrap().push("message");
                    let _ = tx.send(());
                }
            },
            "test",
            SpawnOptions::new(),
        )
        .unwrap();

    engine.send(&pid, 1i32);
    rx.recv_timeout(Duration::from_secs(1)).expect("message never arrived");

    let recorded = order.lock().unwrap().clone();
    assert_eq!(recorded, vec!["initialized", "started", "message"]);
}

#[test]
fn send_with_sender_is_observed() {
    common::init();
    let engine = Engine::new();
    let sender = meshact::Pid::new("local", "foo");
    let (tx, rx) = crossbeam_channel::bounded(1);

    let sender_for_closure = sender.clone();
    let pid = engine
        .spawn_func(
            move |ctx| {
                if ctx.message_as::<String>().is_some() {
                    let observed = ctx.sender().cloned();
                    assert_eq!(observed.as_ref(), Some(&sender_for_closure));
                    let _ = tx.send(());
                }
            },
            "test",
            SpawnOptions::new(),
        )
        .unwrap();

    engine.send_with_sender(&pid, "data".to_string(), sender);
    rx.recv_timeout(Duration::from_secs(1)).expect("message never observed");
}

#[test]
fn concurrent_sends_do_not_corrupt_mailbox() {
    common::init();
    let engine = Engine::new();
    let seen = Arc::new(Mutex::new(0usize));
    let (tx, rx) = crossbeam_channel::bounded(100);

    let seen_for_closure = seen.clone();
    let pid = engine
        .spawn_func(
            move |ctx| {
                if ctx.message_as::<Vec<u8>>().is_some() {
                    *seen_for_closure.lock().unwrap() += 1;
                    let _ = tx.send(());
                }
            },
            "test",
            SpawnOptions::new().inbox_size(256),
        )
        .unwrap();

    let handles: Vec<_> = (0..100)
        .map(|_| {
            let engine = engine.clone();
            let pid = pid.clone();
            std::thread::spawn(move || engine.send(&pid, b"f".to_vec()))
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    for _ in 0..100 {
        rx.recv_timeout(Duration::from_secs(1)).expect("missing delivery");
    }
    assert_eq!(*seen.lock().unwrap(), 100);
}

#[test]
fn concurrent_spawns_with_distinct_tags_all_register() {
    common::init();
    let engine = Engine::new();
    let handles: Vec<_> = (0..10)
        .map(|i| {
            let engine = engine.clone();
            std::thread::spawn(move || {
                let pid = engine
                    .spawn_func(|_ctx| {}, "dummy", SpawnOptions::new().tags([i.to_string()]))
                    .unwrap();
                engine.send(&pid, 1i32);
                pid
            })
        })
        .collect();
    let pids: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for pid in &pids {
        assert_eq!(engine.registry().get(pid), *pid);
    }
}

#[test]
fn poison_deregisters_the_process() {
    common::init();
    let engine = Engine::new();

    for i in 0..4 {
        let (started_tx, started_rx) = crossbeam_channel::bounded(1);
        let (stopped_tx, stopped_rx) = crossbeam_channel::bounded(1);
        let pid = engine
            .spawn_func(
                move |ctx| {
                    use meshact::SystemMessage;
                    match ctx.message_as::<SystemMessage>() {
                        Some(SystemMessage::Started) => {
                            let _ = started_tx.send(());
                        }
                        Some(SystemMessage::Stopped) => {
                            let _ = stopped_tx.send(());
                        }
                        _ => {}
                    }
                },
                "foo",
                SpawnOptions::new().tags([i.to_string()]),
            )
            .unwrap();

        started_rx.recv_timeout(Duration::from_secs(1)).expect("never started");
        engine.poison(&pid);
        stopped_rx.recv_timeout(Duration::from_secs(1)).expect("never stopped");

        assert_eq!(engine.registry().get(&pid), engine.dead_letter());
    }
}

#[test]
fn request_response_round_trip() {
    common::init();
    let engine = Engine::new();
    let pid = engine
        .spawn_func(
            |ctx| {
                if let Some(msg) = ctx.message_as::<String>() {
                    assert_eq!(msg, "foo");
                    ctx.respond("bar".to_string());
                }
            },
            "dummy",
            SpawnOptions::new(),
        )
        .unwrap();

    let response = engine.request(&pid, "foo".to_string(), Duration::from_millis(200));
    let response_pid = response.pid().clone();
    let reply: String = response.result().unwrap();
    assert_eq!(reply, "bar");

    // The ephemeral reply process is torn down either way; its PID now
    // resolves to dead-letter.
    assert_eq!(engine.registry().get(&response_pid), engine.dead_letter());
}

#[test]
fn request_without_a_reply_times_out() {
    common::init();
    let engine = Engine::new();
    let pid = engine.spawn_func(|_ctx| {}, "silent", SpawnOptions::new()).unwrap();

    let response = engine.request(&pid, "foo".to_string(), Duration::from_millis(20));
    let err = response.result::<String>().unwrap_err();
    assert!(matches!(err, EngineError::RequestTimeout));
}

#[test]
fn duplicate_name_and_tags_is_rejected() {
    common::init();
    let engine = Engine::new();
    engine.spawn_func(|_ctx| {}, "dup", SpawnOptions::new()).unwrap();
    let err = engine.spawn_func(|_ctx| {}, "dup", SpawnOptions::new()).unwrap_err();
    assert!(matches!(err, EngineError::DuplicateRegistration(_)));
}

#[test]
fn poison_is_idempotent() {
    common::init();
    let engine = Engine::new();
    let pid = engine.spawn_func(|_ctx| {}, "ephemeral", SpawnOptions::new()).unwrap();
    engine.poison(&pid);
    std::thread::sleep(Duration::from_millis(50));
    // Second poison on an already-stopped PID must not panic or deadlock.
    engine.poison(&pid);
    assert_eq!(engine.registry().get(&pid), engine.dead_letter());
}

#[test]
fn subscribe_observes_spawn_and_stop_events() {
    common::init();
    let engine = Engine::new();
    let feed = engine.subscribe();

    let pid = engine.spawn_func(|_ctx| {}, "observed", SpawnOptions::new()).unwrap();
    let spawned = feed.recv_timeout(Duration::from_secs(1)).expect("no Spawned event");
    match spawned {
        Event::Spawned { pid: spawned_pid, .. } => assert_eq!(spawned_pid, pid),
        other => panic!("expected Spawned, got {other:?}"),
    }

    engine.poison(&pid);
    let stopped = feed.recv_timeout(Duration::from_secs(1)).expect("no Stopped event");
    match stopped {
        Event::Stopped { pid: stopped_pid } => assert_eq!(stopped_pid, pid),
        other => panic!("expected Stopped, got {other:?}"),
    }
}

#[test]
fn sending_to_an_unknown_pid_reaches_dead_letter() {
    common::init();
    let engine = Engine::new();
    let ghost = meshact::Pid::local("ghost");
    // Should not panic; the envelope is silently routed to dead-letter.
    engine.send(&ghost, "nobody home".to_string());
    std::thread::sleep(Duration::from_millis(20));
}
