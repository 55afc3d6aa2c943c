use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use store_framework::{FrameworkError, StoreActor, StoreState, Transition};

// --- Test State ---

#[derive(Clone, Debug, Default, PartialEq)]
struct Shelf {
    books: Vec<String>,
}

#[derive(Debug)]
enum ShelfCommand {
    Add(String),
    Take(String),
    Peek,
}

#[derive(Debug, thiserror::Error)]
enum ShelfError {
    #[error("Book not on shelf: {0}")]
    Missing(String),
    #[error("Shelf storage failed")]
    Storage,
}

/// Collaborators injected through `run()`.
#[derive(Default)]
struct ShelfContext {
    fail_commits: AtomicBool,
    saved: Mutex<Vec<Vec<String>>>,
    failures: AtomicUsize,
    committed: AtomicUsize,
}

#[async_trait]
impl StoreState for Shelf {
    type Command = ShelfCommand;
    type Outcome = usize;
    type Context = Arc<ShelfContext>;
    type Error = ShelfError;

    async fn handle(
        &self,
        command: &ShelfCommand,
        _ctx: &Self::Context,
    ) -> Result<Transition<Self, usize>, ShelfError> {
        match command {
            ShelfCommand::Add(title) => {
                // Yield so concurrent commands get a chance to interleave if the actor allowed it
                tokio::task::yield_now().await;
                let mut next = self.clone();
                next.books.push(title.clone());
                let len = next.books.len();
                Ok(Transition::Commit {
                    state: next,
                    outcome: len,
                })
            }
            ShelfCommand::Take(title) => {
                let position = self
                    .books
                    .iter()
                    .position(|b| b == title)
                    .ok_or_else(|| ShelfError::Missing(title.clone()))?;
                let mut next = self.clone();
                next.books.remove(position);
                let len = next.books.len();
                Ok(Transition::Commit {
                    state: next,
                    outcome: len,
                })
            }
            ShelfCommand::Peek => Ok(Transition::Keep {
                outcome: self.books.len(),
            }),
        }
    }

    fn on_commit(&self, ctx: &Self::Context) -> Result<(), ShelfError> {
        if ctx.fail_commits.load(Ordering::SeqCst) {
            return Err(ShelfError::Storage);
        }
        ctx.saved.lock().unwrap().push(self.books.clone());
        Ok(())
    }

    fn on_committed(&self, _command: &ShelfCommand, ctx: &Self::Context) {
        ctx.committed.fetch_add(1, Ordering::SeqCst);
    }

    fn on_failure(&self, _command: &ShelfCommand, _error: &ShelfError, ctx: &Self::Context) {
        ctx.failures.fetch_add(1, Ordering::SeqCst);
    }
}

fn start(initial: Shelf) -> (store_framework::StoreClient<Shelf>, Arc<ShelfContext>, tokio::task::JoinHandle<()>) {
    let ctx = Arc::new(ShelfContext::default());
    let (actor, client) = StoreActor::new(initial, 10);
    let handle = tokio::spawn(actor.run(ctx.clone()));
    (client, ctx, handle)
}

#[tokio::test]
async fn test_commit_persists_then_publishes() {
    let (client, ctx, handle) = start(Shelf::default());
    let mut feed = client.subscribe();

    let len = client.dispatch(ShelfCommand::Add("Dune".into())).await.unwrap();
    assert_eq!(len, 1);

    feed.changed().await.unwrap();
    assert_eq!(feed.borrow().books, vec!["Dune".to_string()]);
    assert_eq!(client.snapshot().books, vec!["Dune".to_string()]);
    assert_eq!(*ctx.saved.lock().unwrap(), vec![vec!["Dune".to_string()]]);
    assert_eq!(ctx.committed.load(Ordering::SeqCst), 1);

    drop(feed);
    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_failed_handle_leaves_state_untouched() {
    let initial = Shelf {
        books: vec!["Emma".to_string()],
    };
    let (client, ctx, _handle) = start(initial.clone());

    let result = client.dispatch(ShelfCommand::Take("Ulysses".into())).await;
    match result {
        Err(FrameworkError::StateError(inner)) => {
            let err = inner.downcast::<ShelfError>().expect("ShelfError");
            assert!(matches!(*err, ShelfError::Missing(ref t) if t == "Ulysses"));
        }
        other => panic!("Expected StateError, got {:?}", other),
    }

    assert_eq!(client.get().await.unwrap(), initial);
    assert_eq!(ctx.failures.load(Ordering::SeqCst), 1);
    assert!(ctx.saved.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_commit_is_not_published() {
    let (client, ctx, _handle) = start(Shelf::default());
    ctx.fail_commits.store(true, Ordering::SeqCst);

    let feed = client.subscribe();
    let result = client.dispatch(ShelfCommand::Add("Beloved".into())).await;
    assert!(matches!(result, Err(FrameworkError::StateError(_))));

    assert!(!feed.has_changed().unwrap());
    assert!(client.get().await.unwrap().books.is_empty());
    assert_eq!(ctx.failures.load(Ordering::SeqCst), 1);
    assert_eq!(ctx.committed.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_keep_does_not_publish() {
    let (client, ctx, _handle) = start(Shelf::default());
    let feed = client.subscribe();

    let len = client.dispatch(ShelfCommand::Peek).await.unwrap();
    assert_eq!(len, 0);
    assert!(!feed.has_changed().unwrap());
    assert!(ctx.saved.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_concurrent_commands_are_serialized() {
    let (client, ctx, _handle) = start(Shelf::default());

    let mut handles = vec![];
    for i in 0..20 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client.dispatch(ShelfCommand::Add(format!("vol-{i}"))).await
        }));
    }

    let mut lengths = vec![];
    for handle in handles {
        lengths.push(handle.await.unwrap().unwrap());
    }
    lengths.sort_unstable();

    // Every command saw the state left by the previous one
    assert_eq!(lengths, (1..=20).collect::<Vec<_>>());
    assert_eq!(client.get().await.unwrap().books.len(), 20);
    assert_eq!(ctx.saved.lock().unwrap().len(), 20);
}

#[tokio::test]
async fn test_dispatch_after_shutdown_reports_actor_closed() {
    let (actor, client) = StoreActor::new(Shelf::default(), 1);
    // The actor is dropped without running, closing the channel
    drop(actor);

    let result = client.dispatch(ShelfCommand::Peek).await;
    assert!(matches!(result, Err(FrameworkError::ActorClosed)));
    // The last published state is still readable
    assert!(client.snapshot().books.is_empty());
}

/// Collects formatted log output in memory.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

fn capture_logs(level: tracing::Level) -> (LogBuffer, tracing::subscriber::DefaultGuard) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (buffer, guard)
}

// Single-threaded runtime so the actor task logs through this thread's subscriber
#[tokio::test(flavor = "current_thread")]
async fn test_failed_command_leaves_warnings_to_the_state() {
    let (logs, _guard) = capture_logs(tracing::Level::WARN);
    let (client, ctx, _handle) = start(Shelf::default());

    let result = client.dispatch(ShelfCommand::Take("Ulysses".into())).await;
    assert!(result.is_err());
    assert_eq!(ctx.failures.load(Ordering::SeqCst), 1);

    assert!(!logs.contents().contains("Dispatch failed"), "{}", logs.contents());
}

#[tokio::test(flavor = "current_thread")]
async fn test_failed_command_is_logged_at_debug() {
    let (logs, _guard) = capture_logs(tracing::Level::DEBUG);
    let (client, _ctx, _handle) = start(Shelf::default());

    let _ = client.dispatch(ShelfCommand::Take("Ulysses".into())).await;

    let contents = logs.contents();
    assert!(contents.contains("DEBUG"), "{contents}");
    assert!(contents.contains("Dispatch failed"), "{contents}");
    assert!(contents.contains("Book not on shelf: Ulysses"), "{contents}");
}
