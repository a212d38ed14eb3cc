//! Benchmarks for LedgerKV WAL operations

use criterion::{criterion_group, criterion_main, Criterion};
use tempfile::TempDir;

use ledgerkv::wal::{Operation, WalWriter};
use ledgerkv::{RecoveryManager, WalSyncStrategy};

fn append_every_write(c: &mut Criterion) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("bench.wal");
    let mut writer = WalWriter::open(&path, WalSyncStrategy::EveryWrite).unwrap();
    let mut i: u64 = 0;

    c.bench_function("append_every_write", |b| {
        b.iter(|| {
            writer
                .append(Operation::Put {
                    key: format!("key{}", i).into_bytes(),
                    value: b"value".to_vec(),
                })
                .unwrap();
            i += 1;
        })
    });
}

fn append_batched_sync(c: &mut Criterion) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("bench.wal");
    let mut writer =
        WalWriter::open(&path, WalSyncStrategy::EveryNEntries { count: 100 }).unwrap();
    let mut i: u64 = 0;

    c.bench_function("append_batched_sync_100", |b| {
        b.iter(|| {
            writer
                .append(Operation::Put {
                    key: format!("key{}", i).into_bytes(),
                    value: b"value".to_vec(),
                })
                .unwrap();
            i += 1;
        })
    });
}

fn recovery_replay(c: &mut Criterion) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("bench.wal");

    {
        let mut writer =
            WalWriter::open(&path, WalSyncStrategy::EveryNEntries { count: 1000 }).unwrap();
        for i in 0..10_000u64 {
            writer
                .append(Operation::Put {
                    key: format!("key{}", i % 1000).into_bytes(),
                    value: format!("value{}", i).into_bytes(),
                })
                .unwrap();
        }
        writer.sync().unwrap();
    }

    c.bench_function("recovery_replay_10k", |b| {
        b.iter(|| RecoveryManager::recover(&path, WalSyncStrategy::EveryWrite).unwrap())
    });
}

criterion_group!(benches, append_every_write, append_batched_sync, recovery_replay);
criterion_main!(benches);
