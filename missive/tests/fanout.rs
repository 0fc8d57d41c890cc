use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use missive::{
    BestEffort, BoxError, Catalog, DispatchError, Envelope, Handler, Middleware, Next, Outcome,
    Parallel, Reply, Sequential, TypeIdentity, kind,
};
use tokio::time::Duration;

mod common;
use common::{FailingHandler, RecordingHandler, TraceMiddleware, effect_log, ping, pong, shape};

#[tokio::test]
async fn sequential_invokes_handlers_in_registration_order() {
    let log = effect_log();
    let ping = ping();
    let catalog = ["a", "b", "c"].into_iter().fold(Catalog::new(), |catalog, name| {
        catalog.register_notification(
            shape(name, ping.clone()),
            RecordingHandler {
                name,
                log: log.clone(),
            },
        )
    });
    let dispatcher = catalog.into_dispatcher().unwrap();

    let failures = dispatcher
        .publish_with(Envelope::new(ping, ()), Sequential)
        .await
        .unwrap();
    assert!(failures.is_empty());
    assert_eq!(*log.lock().unwrap(), ["a", "b", "c"]);
}

#[tokio::test]
async fn sequential_aborts_on_the_first_failure() {
    let log = effect_log();
    let ping = ping();
    let dispatcher = Catalog::new()
        .register_notification(
            shape("test.A", ping.clone()),
            RecordingHandler {
                name: "a",
                log: log.clone(),
            },
        )
        .register_notification(
            shape("test.B", ping.clone()),
            FailingHandler {
                name: "b",
                log: log.clone(),
            },
        )
        .register_notification(
            shape("test.C", ping.clone()),
            RecordingHandler {
                name: "c",
                log: log.clone(),
            },
        )
        .into_dispatcher()
        .unwrap();

    let err = dispatcher
        .publish_with(Envelope::new(ping, ()), Sequential)
        .await
        .unwrap_err();
    assert!(matches!(err, DispatchError::Failed(_)));
    assert!(err.to_string().contains("test.B"));
    assert_eq!(*log.lock().unwrap(), ["a", "b"]);
}

struct SlowHandler {
    delay: Duration,
    count: Arc<AtomicUsize>,
}

impl Handler for SlowHandler {
    async fn handle(&self, _message: &Envelope) -> Result<Reply, BoxError> {
        tokio::time::sleep(self.delay).await;
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(Reply::none())
    }
}

#[tokio::test]
async fn parallel_runs_every_handler_concurrently() {
    let count = Arc::new(AtomicUsize::new(0));
    let ping = ping();
    let catalog = [50u64, 20, 5].iter().enumerate().fold(
        Catalog::new(),
        |catalog, (index, millis)| {
            catalog.register_notification(
                shape(["test.A", "test.B", "test.C"][index], ping.clone()),
                SlowHandler {
                    delay: Duration::from_millis(*millis),
                    count: count.clone(),
                },
            )
        },
    );
    let dispatcher = catalog.into_dispatcher().unwrap();

    let start = std::time::Instant::now();
    let failures = dispatcher
        .publish_with(Envelope::new(ping, ()), Parallel)
        .await
        .unwrap();
    assert!(failures.is_empty());
    assert_eq!(count.load(Ordering::SeqCst), 3);
    // 3 handlers at 50+20+5ms sequentially would be 75ms; concurrent runs
    // finish close to the slowest.
    assert!(start.elapsed() < Duration::from_millis(70));
}

#[tokio::test]
async fn parallel_propagates_the_first_failure() {
    let log = effect_log();
    let ping = ping();
    let dispatcher = Catalog::new()
        .register_notification(
            shape("test.A", ping.clone()),
            RecordingHandler {
                name: "a",
                log: log.clone(),
            },
        )
        .register_notification(
            shape("test.B", ping.clone()),
            FailingHandler {
                name: "b",
                log: log.clone(),
            },
        )
        .into_dispatcher()
        .unwrap();

    let err = dispatcher
        .publish_with(Envelope::new(ping, ()), Parallel)
        .await
        .unwrap_err();
    assert!(matches!(err, DispatchError::Failed(_)));
    assert!(err.to_string().contains("b refused"));
}

#[tokio::test]
async fn best_effort_collects_failures_and_runs_everyone() {
    let log = effect_log();
    let ping = ping();
    let dispatcher = Catalog::new()
        .register_notification(
            shape("test.A", ping.clone()),
            RecordingHandler {
                name: "a",
                log: log.clone(),
            },
        )
        .register_notification(
            shape("test.B", ping.clone()),
            FailingHandler {
                name: "b",
                log: log.clone(),
            },
        )
        .register_notification(
            shape("test.C", ping.clone()),
            RecordingHandler {
                name: "c",
                log: log.clone(),
            },
        )
        .into_dispatcher()
        .unwrap();

    let failures = dispatcher.publish(Envelope::new(ping, ())).await.unwrap();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].handler.key(), "test.B");
    assert!(failures[0].error.to_string().contains("b refused"));

    let mut ran = log.lock().unwrap().clone();
    ran.sort();
    assert_eq!(ran, ["a", "b", "c"]);
}

#[tokio::test]
async fn publishing_without_handlers_is_a_noop() {
    let dispatcher = Catalog::new().into_dispatcher().unwrap();

    let failures = dispatcher.publish(Envelope::new(ping(), ())).await.unwrap();
    assert!(failures.is_empty());
}

/// Records how many failures `next` resolved with.
struct FailureObserver {
    seen: Arc<Mutex<Option<usize>>>,
}

impl Middleware for FailureObserver {
    async fn handle(&self, message: Envelope, next: Next<'_>) -> Result<Outcome, BoxError> {
        let outcome = next.run(message).await?;
        if let Outcome::Failures(failures) = &outcome {
            *self.seen.lock().unwrap() = Some(failures.len());
        }
        Ok(outcome)
    }
}

#[tokio::test]
async fn middleware_sees_collected_failures_as_a_value() {
    let seen = Arc::new(Mutex::new(None));
    let log = effect_log();
    let ping = ping();
    let dispatcher = Catalog::new()
        .register_notification(
            shape("test.B", ping.clone()),
            FailingHandler {
                name: "b",
                log,
            },
        )
        .register_middleware(
            shape("test.Observer", kind::notification()),
            FailureObserver { seen: seen.clone() },
        )
        .into_dispatcher()
        .unwrap();

    let failures = dispatcher
        .publish_with(Envelope::new(ping, ()), BestEffort)
        .await
        .unwrap();
    assert_eq!(failures.len(), 1);
    assert_eq!(*seen.lock().unwrap(), Some(1));
}

#[tokio::test]
async fn middleware_wraps_the_whole_fanout_once() {
    let log = effect_log();
    let ping = ping();
    let dispatcher = Catalog::new()
        .register_notification(
            shape("test.A", ping.clone()),
            RecordingHandler {
                name: "a",
                log: log.clone(),
            },
        )
        .register_notification(
            shape("test.B", ping.clone()),
            RecordingHandler {
                name: "b",
                log: log.clone(),
            },
        )
        .register_middleware(
            shape("test.Trace", kind::notification()),
            TraceMiddleware {
                name: "trace",
                log: log.clone(),
            },
        )
        .into_dispatcher()
        .unwrap();

    dispatcher
        .publish_with(Envelope::new(ping, ()), Sequential)
        .await
        .unwrap();
    assert_eq!(
        *log.lock().unwrap(),
        ["trace:before", "a", "b", "trace:after"]
    );
}

#[tokio::test]
async fn one_handler_can_service_several_notification_types() {
    let log = effect_log();
    let ping = ping();
    let pong = pong();
    let dispatcher = Catalog::new()
        .register_notification(
            TypeIdentity::new("test.Sink")
                .services(ping.clone())
                .services(pong.clone()),
            RecordingHandler {
                name: "sink",
                log: log.clone(),
            },
        )
        .into_dispatcher()
        .unwrap();

    dispatcher.publish(Envelope::new(ping, ())).await.unwrap();
    dispatcher.publish(Envelope::new(pong, ())).await.unwrap();
    assert_eq!(*log.lock().unwrap(), ["sink", "sink"]);
}
