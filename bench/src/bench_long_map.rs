use std::collections::HashMap;
use std::time::Instant;

use dashmap::DashMap;
use longmap::{LongKeyedMap, LongMap};
use rand::Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

const NUM_ENTRIES: usize = 1_000_000;

macro_rules! bench {
    ($name: expr, $body: expr) => {
        let now = Instant::now();
        $body;
        let elapsed = now.elapsed();
        info!("{} elapsed: {:.2?}", $name, elapsed);
    };
}

fn make_random_pairs(n: usize) -> Vec<(i64, u64)> {
    let mut rng = rand::thread_rng();
    (0..n).map(|_| (rng.gen::<i64>(), rng.gen::<u64>())).collect()
}

fn make_sequential_pairs(n: usize) -> Vec<(i64, u64)> {
    (0..n as i64).map(|key| (key, key as u64)).collect()
}

fn bench_inserts(label: &str, src: &[(i64, u64)]) {
    info!("bench inserts ({})", label);

    bench!("LongMap", {
        let mut map = LongMap::new();
        for &(key, val) in src {
            map.put(key, val);
        }
    });

    bench!("HashMap", {
        let mut map = HashMap::new();
        for &(key, val) in src {
            map.insert(key, val);
        }
    });

    bench!("DashMap", {
        let map = DashMap::new();
        for &(key, val) in src {
            map.insert(key, val);
        }
    });
}

fn bench_lookups(label: &str, src: &[(i64, u64)]) {
    info!("bench lookups ({})", label);

    let map: LongMap<u64> = src.iter().copied().collect();
    bench!("LongMap", {
        let hits = src.iter().filter(|(key, _)| map.get(*key).is_some()).count();
        assert_eq!(hits, src.len());
    });

    let hmap: HashMap<i64, u64> = src.iter().copied().collect();
    bench!("HashMap", {
        let hits = src.iter().filter(|(key, _)| hmap.get(key).is_some()).count();
        assert_eq!(hits, src.len());
    });

    let dmap: DashMap<i64, u64> = src.iter().copied().collect();
    bench!("DashMap", {
        let hits = src.iter().filter(|(key, _)| dmap.get(key).is_some()).count();
        assert_eq!(hits, src.len());
    });
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let random = make_random_pairs(NUM_ENTRIES);
    let sequential = make_sequential_pairs(NUM_ENTRIES);

    bench_inserts("random keys", &random);
    bench_inserts("sequential keys", &sequential);

    // random keys may repeat; lookups only need each key present
    bench_lookups("random keys", &random);
    bench_lookups("sequential keys", &sequential);
}
