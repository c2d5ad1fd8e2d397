use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use query_cache::{QueryCache, ScopedKey};

fn short_lived() -> QueryCache<ScopedKey, Arc<Vec<String>>> {
    QueryCache::with_ttl(100, Duration::from_millis(200))
}

#[tokio::test]
async fn test_entry_expires_without_sweep() {
    let cache = short_lived();
    let key = ScopedKey::new("keyword", "ruby");
    cache.set(key.clone(), Arc::new(vec!["a".into()])).await;
    assert!(cache.get(&key).await.is_some());

    tokio::time::sleep(Duration::from_millis(400)).await;

    assert!(cache.get(&key).await.is_none());
}

#[tokio::test]
async fn test_sweep_purges_expired_entries() {
    let cache = short_lived();
    for i in 0..5 {
        cache
            .set(ScopedKey::new("window", format!("{i},{}", i + 1)), Arc::new(vec![]))
            .await;
    }
    cache.sweep().await;
    assert_eq!(cache.entry_count(), 5);

    tokio::time::sleep(Duration::from_millis(400)).await;
    cache.sweep().await;

    assert_eq!(cache.entry_count(), 0);
}

#[tokio::test]
async fn test_refetch_after_expiry() {
    let cache = short_lived();
    let key = ScopedKey::new("keyword", "go");
    let fetches = AtomicUsize::new(0);

    for _ in 0..2 {
        let value: Result<_, Arc<String>> = cache
            .get_or_try_fetch(key.clone(), async {
                fetches.fetch_add(1, Ordering::SeqCst);
                Ok(Arc::new(vec!["event".to_string()]))
            })
            .await;
        assert_eq!(value.unwrap().len(), 1);
    }
    assert_eq!(fetches.load(Ordering::SeqCst), 1);

    tokio::time::sleep(Duration::from_millis(400)).await;

    let value: Result<_, Arc<String>> = cache
        .get_or_try_fetch(key, async {
            fetches.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(vec![]))
        })
        .await;
    assert!(value.unwrap().is_empty());
    assert_eq!(fetches.load(Ordering::SeqCst), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_misses_share_one_fetch() {
    let cache: QueryCache<ScopedKey, Arc<Vec<String>>> =
        QueryCache::with_ttl(100, Duration::from_secs(60));
    let fetches = Arc::new(AtomicUsize::new(0));

    let tasks = (0..8).map(|_| {
        let cache = cache.clone();
        let fetches = fetches.clone();
        tokio::spawn(async move {
            let result: Result<_, Arc<String>> = cache
                .get_or_try_fetch(ScopedKey::new("keyword", "rust"), async move {
                    fetches.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    Ok(Arc::new(vec!["Memphis Rust".to_string()]))
                })
                .await;
            result.unwrap()
        })
    });

    let results = futures::future::join_all(tasks).await;

    for result in results {
        assert_eq!(result.unwrap().as_slice(), ["Memphis Rust".to_string()]);
    }
    assert_eq!(fetches.load(Ordering::SeqCst), 1);
}
