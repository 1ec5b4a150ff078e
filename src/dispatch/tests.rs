use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::time::{Instant, timeout};

use super::Dispatcher;
use crate::registry::{DeliveryError, Handler, Registry};
use crate::storage::StorageError;

fn counting_handler(counter: Arc<AtomicUsize>, done: UnboundedSender<()>) -> Handler {
    let handler: Handler = Arc::new(move || {
        let counter = counter.clone();
        let done = done.clone();
        Box::pin(async move {
            counter.fetch_add(1, Ordering::SeqCst);
            let _ = done.send(());
            Ok(())
        })
    });
    handler
}

fn failing_handler(done: UnboundedSender<()>) -> Handler {
    let handler: Handler = Arc::new(move || {
        let done = done.clone();
        Box::pin(async move {
            let _ = done.send(());
            Err(DeliveryError::Fetch(StorageError::Unavailable(
                "boom".to_string(),
            )))
        })
    });
    handler
}

#[tokio::test]
async fn test_publish_reaches_all_subscribers() {
    let registry = Arc::new(Registry::new());
    let dispatcher = Dispatcher::new(registry.clone());
    let counter = Arc::new(AtomicUsize::new(0));
    let (done_tx, mut done_rx) = mpsc::unbounded_channel();

    registry.subscribe("p1", counting_handler(counter.clone(), done_tx.clone()));
    registry.subscribe("p1", counting_handler(counter.clone(), done_tx));

    dispatcher.publish("p1");

    timeout(Duration::from_secs(1), done_rx.recv()).await.unwrap();
    timeout(Duration::from_secs(1), done_rx.recv()).await.unwrap();
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_publish_returns_before_handlers_run() {
    let registry = Arc::new(Registry::new());
    let dispatcher = Dispatcher::new(registry.clone());
    let (done_tx, mut done_rx) = mpsc::unbounded_channel();

    let slow: Handler = Arc::new(move || {
        let done = done_tx.clone();
        Box::pin(async move {
            tokio::time::sleep(Duration::from_millis(200)).await;
            let _ = done.send(());
            Ok(())
        })
    });
    registry.subscribe("p1", slow);

    let start = Instant::now();
    dispatcher.publish("p1");
    assert!(start.elapsed() < Duration::from_millis(50));

    timeout(Duration::from_secs(1), done_rx.recv()).await.unwrap();
}

#[tokio::test]
async fn test_one_failing_handler_does_not_starve_others() {
    let registry = Arc::new(Registry::new());
    let dispatcher = Dispatcher::new(registry.clone());
    let counter = Arc::new(AtomicUsize::new(0));
    let (done_tx, mut done_rx) = mpsc::unbounded_channel();

    registry.subscribe("p1", failing_handler(done_tx.clone()));
    registry.subscribe("p1", counting_handler(counter.clone(), done_tx));

    dispatcher.publish("p1");

    timeout(Duration::from_secs(1), done_rx.recv()).await.unwrap();
    timeout(Duration::from_secs(1), done_rx.recv()).await.unwrap();
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_publish_without_subscribers_is_noop() {
    let registry = Arc::new(Registry::new());
    let dispatcher = Dispatcher::new(registry.clone());

    dispatcher.publish("nobody-home");
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(registry.subscription_count(), 0);
}
