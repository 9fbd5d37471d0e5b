use sqlmask_rs_sdk::{
    column_hash, open_anonymizer, AnonymizeRequest, AnonymizerConfig, ColumnHashPair,
    MappingStore, SqliteMappingStore,
};

fn run_async<F, Fut>(build_future: F)
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: std::future::Future<Output = ()> + 'static,
{
    std::thread::Builder::new()
        .name("sqlmask-rs-sdk-test".to_string())
        .spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("tokio runtime should build");
            runtime.block_on(build_future());
        })
        .expect("test thread should spawn")
        .join()
        .expect("test thread should join");
}

fn pair(name: &str) -> ColumnHashPair {
    ColumnHashPair::new(name, column_hash(name))
}

#[tokio::test]
async fn repeated_upserts_keep_one_record_per_name() {
    let store = SqliteMappingStore::in_memory().expect("in-memory store should open");

    store.upsert_many(&[pair("a"), pair("b")]).await.unwrap();
    store.upsert_many(&[pair("a"), pair("b")]).await.unwrap();

    let mut listed = store.list_all().await.unwrap();
    listed.sort();
    assert_eq!(listed, vec![pair("a"), pair("b")]);
}

#[tokio::test]
async fn stored_hash_is_never_overwritten() {
    let store = SqliteMappingStore::in_memory().expect("in-memory store should open");

    store
        .upsert_many(&[ColumnHashPair::new("a", "stale")])
        .await
        .unwrap();
    store.upsert_many(&[pair("a")]).await.unwrap();

    assert_eq!(
        store.list_all().await.unwrap(),
        vec![ColumnHashPair::new("a", "stale")]
    );
}

#[tokio::test]
async fn mappings_survive_reopening_the_file() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("mappings.db");

    {
        let store = SqliteMappingStore::open(&path).expect("store should open");
        store.upsert_many(&[pair("email")]).await.unwrap();
    }

    let reopened = SqliteMappingStore::open(&path).expect("store should reopen");
    assert_eq!(reopened.list_all().await.unwrap(), vec![pair("email")]);
}

#[tokio::test]
async fn anonymizer_persists_discovered_columns() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let anonymizer = open_anonymizer(dir.path().join("mappings.db"), AnonymizerConfig::default())
        .expect("anonymizer should open");

    let response = anonymizer
        .anonymize(AnonymizeRequest::new("select a, b from test where a > 1"))
        .await
        .expect("anonymize should succeed");

    assert_eq!(response.hashed_columns(), &[pair("a"), pair("b")]);
    assert_eq!(
        anonymizer.list_mappings().await.unwrap(),
        vec![pair("a"), pair("b")]
    );
}

#[test]
fn concurrent_writers_on_one_file_store_each_name_once() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("mappings.db");
    SqliteMappingStore::open(&path).expect("schema should initialize");

    let names = ["a", "b", "c", "d", "e", "f"];
    let writers = (0..6)
        .map(|writer| {
            let path = path.clone();
            let batch = names
                .iter()
                .cycle()
                .skip(writer)
                .take(4)
                .map(|name| pair(name))
                .collect::<Vec<_>>();
            std::thread::spawn(move || {
                run_async(move || async move {
                    let store = SqliteMappingStore::open(&path).expect("store should open");
                    for _ in 0..5 {
                        store.upsert_many(&batch).await.expect("upsert should succeed");
                    }
                });
            })
        })
        .collect::<Vec<_>>();
    for writer in writers {
        writer.join().expect("writer thread should join");
    }

    run_async(move || async move {
        let store = SqliteMappingStore::open(&path).expect("store should open");
        let mut listed = store.list_all().await.unwrap();
        listed.sort();
        assert_eq!(listed, names.iter().map(|name| pair(name)).collect::<Vec<_>>());
    });
}
