use std::cell::Cell;
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};

use compare::{natural, Compare};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rbtree_map::{Error, RbTreeMap};

fn init_logger() {
    let _ = simplelog::TestLogger::init(
        simplelog::LevelFilter::Debug,
        simplelog::Config::default(),
    );
}

fn sample() -> RbTreeMap<i32, &'static str> {
    let mut map = RbTreeMap::new();
    for (k, v) in [
        (10, "ten"),
        (5, "five"),
        (15, "fifteen"),
        (3, "three"),
        (7, "seven"),
        (12, "twelve"),
        (18, "eighteen"),
    ] {
        map.insert(k, v);
    }
    map
}

fn keys<V, C: Compare<i32>>(map: &RbTreeMap<i32, V, C>) -> Vec<i32> {
    map.keys().cloned().collect()
}

#[test]
pub fn test_rand_large() {
    let n: usize = 50;
    let mut map = RbTreeMap::new();
    let mut rng = StdRng::seed_from_u64(50);
    let mut log = Vec::new();

    for _ in 0..n {
        let i = rng.gen::<usize>() % (2 * n);
        if !map.contains_key(&i) {
            log.push(i);
        }
        map.insert(i, i);
        map.validate().unwrap();
    }

    for i in log {
        assert_eq!(map.get(&i).cloned(), Some(i));
    }
}

#[test]
fn test_basic_large() {
    let mut map = RbTreeMap::new();
    let size = 10000;
    assert_eq!(map.len(), 0);

    for i in 0..size {
        assert!(map.insert(i, 10 * i).1);
        assert_eq!(map.len(), i + 1);
    }
    map.validate().unwrap();

    for i in 0..size {
        assert_eq!(map.get(&i).unwrap(), &(i * 10));
    }

    for i in size..size * 2 {
        assert_eq!(map.get(&i), None);
    }

    for i in 0..size {
        assert_eq!(map.insert_or_assign(i, 100 * i), Some(10 * i));
        assert_eq!(map.len(), size);
    }

    for i in 0..size {
        assert_eq!(map.get(&i).unwrap(), &(i * 100));
    }

    for i in 0..size / 2 {
        assert_eq!(map.remove(&(i * 2)), Some(i * 200));
        assert_eq!(map.len(), size - i - 1);
    }
    map.validate().unwrap();

    for i in 0..size / 2 {
        assert_eq!(map.get(&(2 * i)), None);
        assert_eq!(map.get(&(2 * i + 1)).unwrap(), &((2 * i + 1) * 100));
    }
}

#[test]
fn test_basic_small() {
    let mut map = RbTreeMap::new();
    assert_eq!(map.get(&1), None);
    assert!(map.insert(1, 1).1);
    assert_eq!(map.get(&1), Some(&1));
    assert!(!map.insert(1, 2).1);
    assert_eq!(map.get(&1), Some(&1));
    assert_eq!(map.insert_or_assign(1, 2), Some(1));
    assert_eq!(map.get(&1), Some(&2));
    assert!(map.insert(2, 4).1);
    assert_eq!(map.get(&2), Some(&4));
    assert_eq!(map.remove(&1), Some(2));
    assert_eq!(map.remove(&2), Some(4));
    assert_eq!(map.remove(&1), None);
    assert!(map.is_empty());
    map.validate().unwrap();
}

#[test]
fn test_iter() {
    let size = 10000;
    let mut rng = StdRng::seed_from_u64(10000);

    let mut map = RbTreeMap::new();
    let mut log = Vec::new();
    for _ in 0..size {
        let key = rng.gen::<usize>();
        let val = rng.gen::<usize>();
        if !map.contains_key(&key) {
            log.push((key, val));
        }
        map.insert(key, val);
    }
    log.sort();

    fn test<T>(mut iter: T, log: Vec<(usize, usize)>)
    where
        T: ExactSizeIterator<Item = (usize, usize)>,
    {
        let size = log.len();
        for (i, kv) in log.into_iter().enumerate() {
            assert_eq!(iter.size_hint(), (size - i, Some(size - i)));
            assert_eq!(iter.next().unwrap(), kv);
        }
        assert_eq!(iter.size_hint(), (0, Some(0)));
        assert_eq!(iter.next(), None);
    }
    test(map.iter().map(|(&k, &v)| (k, v)), log.clone());
    test(map.iter().rev().map(|(&k, &v)| (k, v)), log.iter().rev().cloned().collect());
    test(map.clone().into_iter(), log.clone());
    test(map.into_iter().rev(), log.into_iter().rev().collect());
}

#[test]
fn test_iter_both_ends() {
    let map: RbTreeMap<_, _> = (0..10).map(|i| (i, i * i)).collect();
    let mut iter = map.iter();
    assert_eq!(iter.next(), Some((&0, &0)));
    assert_eq!(iter.next_back(), Some((&9, &81)));
    assert_eq!(iter.len(), 8);
    let middle: Vec<_> = iter.by_ref().map(|(&k, _)| k).collect();
    assert_eq!(middle, [1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next_back(), None);
}

#[test]
fn test_iter_mut() {
    let mut map: RbTreeMap<_, _> = (0..100).map(|i| (i, i)).collect();
    for (k, v) in map.iter_mut() {
        *v += k;
    }
    for v in map.values_mut().rev().take(10) {
        *v = 0;
    }
    for i in 0..90 {
        assert_eq!(map[&i], 2 * i);
    }
    assert!(map.values().skip(90).all(|&v| v == 0));
    for (_, v) in &mut map {
        *v += 1;
    }
    assert_eq!(map.values().sum::<i32>(), (0..90).map(|i| 2 * i + 1).sum::<i32>() + 10);
}

#[test]
fn test_model_random_ops() {
    init_logger();
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut map = RbTreeMap::new();
    let mut model = BTreeMap::new();

    for _ in 0..4000 {
        let key = rng.gen_range(0..300);
        match rng.gen_range(0..3) {
            0 | 1 => {
                let value = rng.gen::<u32>();
                let (position, inserted) = map.insert(key, value);
                assert_eq!(inserted, !model.contains_key(&key));
                model.entry(key).or_insert(value);
                assert_eq!(map.key_value_at(position), model.get_key_value(&key));
            }
            _ => {
                assert_eq!(map.remove(&key), model.remove(&key));
            }
        }
        map.validate().unwrap();
        assert_eq!(map.len(), model.len());
    }

    assert!(map.iter().eq(model.iter()));
    assert!(map.iter().rev().eq(model.iter().rev()));
}

#[test]
fn test_round_trip_to_empty() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut keys: Vec<u32> = (0..1000).collect();
    keys.shuffle(&mut rng);

    let mut map = RbTreeMap::new();
    for &k in &keys {
        assert!(map.insert(k, ()).1);
    }
    map.validate().unwrap();

    keys.shuffle(&mut rng);
    for &k in &keys {
        assert_eq!(map.erase_key(&k), 1);
        map.validate().unwrap();
    }
    assert!(map.is_empty());
    assert_eq!(map.begin(), map.end());
    assert_eq!(map.iter().next(), None);

    // The emptied map is as good as new.
    assert!(map.insert(1, ()).1);
    assert_eq!(map.keys().cloned().collect::<Vec<_>>(), [1]);
}

#[test]
fn test_erase_absent() {
    let mut map = sample();
    assert_eq!(map.erase_key(&4), 0);
    assert_eq!(map.erase(map.end()), None);
    assert_eq!(map.len(), 7);
    map.validate().unwrap();

    let mut empty: RbTreeMap<i32, ()> = RbTreeMap::new();
    assert_eq!(empty.erase_key(&4), 0);
    assert_eq!(empty.pop_first(), None);
    assert_eq!(empty.pop_last(), None);
}

#[test]
fn test_position_stability() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut map = RbTreeMap::new();
    for k in 0..500 {
        map.insert(k * 2, k);
    }
    let watched: Vec<_> = [0, 250, 500, 998].iter().map(|&k| (k, map.find(&k))).collect();

    for _ in 0..2000 {
        let key = rng.gen_range(0..1000);
        if watched.iter().any(|&(k, _)| k == key) {
            continue;
        }
        if rng.gen() {
            map.insert(key, key / 2);
        } else {
            map.remove(&key);
        }
    }
    map.validate().unwrap();

    for (k, position) in watched {
        assert_eq!(map.key_value_at(position), Some((&k, &(k / 2))));
        assert_eq!(map.find(&k), position);
    }
}

#[test]
fn test_sample_order() {
    let map = sample();
    assert_eq!(keys(&map), [3, 5, 7, 10, 12, 15, 18]);
    assert_eq!(map.len(), 7);
    map.validate().unwrap();
}

#[test]
fn test_erase_two_children() {
    init_logger();
    let mut map = sample();
    let seven = map.find(&7);
    let twelve = map.find(&12);

    assert_eq!(map.erase(map.find(&10)), Some((10, "ten")));
    assert_eq!(keys(&map), [3, 5, 7, 12, 15, 18]);
    map.validate().unwrap();
    map.dump();

    assert_eq!(map.key_value_at(seven), Some((&7, &"seven")));
    assert_eq!(map.next_position(seven), twelve);
    assert_eq!(map.find(&10), map.end());
}

#[test]
fn test_get_or_insert_default() {
    let mut map: RbTreeMap<i32, i32> = (0..10).map(|i| (i, i)).collect();
    let value = map.get_or_insert_default(99);
    assert_eq!(*value, 0);
    *value = 42;
    assert_ne!(map.find(&99), map.end());
    assert_eq!(map[&99], 42);

    *map.get_or_insert_default(5) += 1;
    assert_eq!(map[&5], 6);
    assert_eq!(*map.get_or_insert_with(100, || 7), 7);
    assert_eq!(map.len(), 12);
    map.validate().unwrap();
}

#[test]
#[should_panic(expected = "no entry found for key")]
fn test_index_absent() {
    let map = sample();
    let _value: &str = map[&4];
}

#[test]
fn test_bounds() {
    let map: RbTreeMap<_, _> = [3, 5, 7, 10].iter().map(|&k| (k, ())).collect();

    let (lo, hi) = map.equal_range(&7);
    assert_eq!(lo, map.find(&7));
    assert_eq!(hi, map.find(&10));
    assert_eq!(map.range(lo, hi).count(), 1);

    let (lo, hi) = map.equal_range(&6);
    assert_eq!(lo, hi);
    assert_eq!(lo, map.find(&7));

    assert_eq!(map.lower_bound(&0), map.begin());
    assert_eq!(map.upper_bound(&10), map.end());
    assert_eq!(map.lower_bound(&11), map.end());
    assert_eq!(map.upper_bound(&3), map.find(&5));

    let empty: RbTreeMap<i32, ()> = RbTreeMap::new();
    assert_eq!(empty.lower_bound(&1), empty.end());
    assert_eq!(empty.upper_bound(&1), empty.end());
}

#[test]
fn test_range_from_erased_positions() {
    let mut map: RbTreeMap<_, _> = (0..20).map(|k| (k, k)).collect();
    let nine = map.find(&9);
    let twelve = map.find(&12);
    map.remove(&9);

    assert_eq!(map.range(nine, map.end()).count(), 0);
    assert_eq!(map.range(map.begin(), nine).count(), 19);
    let tail: Vec<_> = map.range(twelve, nine).map(|(&k, _)| k).collect();
    assert_eq!(tail, (12..20).collect::<Vec<_>>());
    assert_eq!(map.range(nine, nine).next_back(), None);

    map.clear();
    assert_eq!(map.range(twelve, map.end()).count(), 0);
    assert_eq!(map.range(map.begin(), twelve).next_back(), None);
}

#[test]
fn test_panicking_comparator_leaves_map_intact() {
    let armed = Cell::new(false);
    let cmp = |l: &i32, r: &i32| {
        if armed.get() {
            panic!("comparison refused");
        }
        l.cmp(r)
    };
    let mut map = RbTreeMap::with_cmp(cmp);
    for k in 0..50 {
        map.insert(k, k);
    }

    armed.set(true);
    let inserted = panic::catch_unwind(AssertUnwindSafe(|| {
        map.insert(100, 1);
    }));
    assert!(inserted.is_err());
    let removed = panic::catch_unwind(AssertUnwindSafe(|| map.remove(&10)));
    assert!(removed.is_err());
    armed.set(false);

    map.validate().unwrap();
    assert_eq!(map.len(), 50);
    assert_eq!(map.get(&100), None);
    assert_eq!(map.get(&10), Some(&10));
    assert!(map.insert(100, 1).1);
    map.validate().unwrap();
}

#[test]
fn test_bounds_match_scan() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut map = RbTreeMap::new();
    for _ in 0..200 {
        map.insert(rng.gen_range(0..400), ());
    }
    for probe in -1..401 {
        let lower = map.keys().position(|&k| k >= probe);
        let upper = map.keys().position(|&k| k > probe);
        let at = |position| map.range(map.begin(), position).count();
        assert_eq!(Some(at(map.lower_bound(&probe))), lower.or(Some(map.len())));
        assert_eq!(Some(at(map.upper_bound(&probe))), upper.or(Some(map.len())));
    }
}

#[test]
fn test_positions_walk() {
    let map = sample();
    let mut forwards = Vec::new();
    let mut position = map.begin();
    while !position.is_end() {
        forwards.push(*map.key_value_at(position).unwrap().0);
        position = map.next_position(position);
    }
    assert_eq!(forwards, [3, 5, 7, 10, 12, 15, 18]);

    let mut backwards = Vec::new();
    let mut position = map.prev_position(map.end());
    while !position.is_end() {
        backwards.push(*map.key_value_at(position).unwrap().0);
        position = map.prev_position(position);
    }
    assert_eq!(backwards, [18, 15, 12, 10, 7, 5, 3]);

    assert_eq!(map.next_position(map.end()), map.begin());
    assert_eq!(map.key_value_at(map.end()), None);
}

#[test]
fn test_erase_range() {
    init_logger();
    let mut map: RbTreeMap<_, _> = (0..100).map(|i| (i, i)).collect();
    let removed = map.erase_range(map.lower_bound(&10), map.upper_bound(&89));
    assert_eq!(removed, 80);
    assert_eq!(map.len(), 20);
    map.validate().unwrap();
    assert!(map.keys().all(|&k| k < 10 || k >= 90));

    assert_eq!(map.erase_range(map.find(&5), map.find(&5)), 0);
    assert_eq!(map.erase_range(map.begin(), map.end()), 20);
    assert!(map.is_empty());
    map.validate().unwrap();
}

#[test]
fn test_pop_and_retain() {
    let mut map: RbTreeMap<_, _> = (0..50).map(|i| (i, i)).collect();
    assert_eq!(map.pop_first(), Some((0, 0)));
    assert_eq!(map.pop_last(), Some((49, 49)));
    assert_eq!(map.first_key_value(), Some((&1, &1)));
    assert_eq!(map.last_key_value(), Some((&48, &48)));

    map.retain(|&k, v| {
        *v *= 10;
        k % 3 == 0
    });
    map.validate().unwrap();
    assert_eq!(keys(&map), (1..49).filter(|k| k % 3 == 0).collect::<Vec<_>>());
    assert!(map.iter().all(|(&k, &v)| v == k * 10));
}

#[test]
fn test_custom_comparator() {
    let mut map = RbTreeMap::with_cmp(natural().rev());
    for k in [4, 1, 3, 5, 2] {
        map.insert(k, k.to_string());
    }
    assert_eq!(keys(&map), [5, 4, 3, 2, 1]);
    assert_eq!(map.lower_bound(&3), map.find(&3));
    assert_eq!(map.upper_bound(&3), map.find(&2));
    map.validate().unwrap();

    let by_len = |l: &String, r: &String| l.len().cmp(&r.len());
    let mut words = RbTreeMap::with_cmp(by_len);
    assert!(words.insert("apple".to_string(), 1).1);
    assert!(words.insert("fig".to_string(), 2).1);
    assert!(!words.insert("grape".to_string(), 3).1);
    assert_eq!(words.get(&"kiwi!".to_string()), Some(&1));
    assert_eq!(words.keys().map(|w| w.as_str()).collect::<Vec<_>>(), ["fig", "apple"]);
}

#[test]
fn test_cursor() {
    let map = sample();
    let mut cursor = map.cursor_front();
    assert_eq!(cursor.key(), Some(&3));
    assert_eq!(cursor.peek_prev(), None);
    assert_eq!(cursor.peek_next(), Some((&5, &"five")));
    cursor.move_prev();
    assert!(cursor.position().is_end());
    assert_eq!(cursor.key_value(), None);
    cursor.move_prev();
    assert_eq!(cursor.key(), Some(&18));

    let back = map.cursor_back();
    assert_eq!(back.value(), Some(&"eighteen"));
    assert_eq!(back.position(), cursor.position());
}

#[test]
fn test_cursor_mut() {
    let mut map: RbTreeMap<_, _> = (0..20).map(|i| (i, i)).collect();
    let mut cursor = map.cursor_mut(map.find(&5));
    *cursor.value_mut().unwrap() = 500;
    cursor.move_next();
    for _ in 0..5 {
        assert!(cursor.remove_current().is_some());
    }
    assert_eq!(cursor.key(), Some(&11));
    assert_eq!(cursor.as_cursor().peek_prev(), Some((&5, &500)));

    let mut end = map.cursor_mut(map.end());
    assert_eq!(end.remove_current(), None);

    assert_eq!(map.len(), 15);
    assert_eq!(map[&5], 500);
    map.validate().unwrap();
}

#[test]
fn test_try_insert() {
    let mut map = RbTreeMap::new();
    let (position, inserted) = map.try_insert(1, "a").unwrap();
    assert!(inserted);
    assert_eq!(map.try_insert(1, "b"), Ok((position, false)));
    assert_eq!(map[&1], "a");

    let value: Result<&mut &str, Error> = map.try_get_or_insert_with(2, || "b");
    assert_eq!(value.map(|v| *v), Ok("b"));
    assert_eq!(map.len(), 2);
}

#[test]
fn test_clone_eq_ord() {
    let map = sample();
    let mut copy = map.clone();
    assert_eq!(copy, map);
    copy.validate().unwrap();

    copy.remove(&18);
    assert_ne!(copy, map);
    assert!(copy < map);

    let mut target = RbTreeMap::new();
    target.insert(1, "one");
    target.clone_from(&map);
    assert_eq!(target, map);

    let front: Vec<_> = copy.clone().into_iter().take(2).collect();
    assert_eq!(format!("{:?}", front), "[(3, \"three\"), (5, \"five\")]");
    assert_eq!(format!("{:?}", RbTreeMap::<i32, i32>::new()), "{}");
}

#[test]
fn test_swap_and_clear() {
    init_logger();
    let mut a = sample();
    let mut b: RbTreeMap<_, _> = [(1, "one")].into_iter().collect();
    let seven = a.find(&7);

    a.swap(&mut b);
    assert_eq!(keys(&a), [1]);
    assert_eq!(b.len(), 7);
    assert_eq!(b.key_value_at(seven), Some((&7, &"seven")));

    b.clear();
    assert!(b.is_empty());
    assert_eq!(b.begin(), b.end());
    b.validate().unwrap();
    b.insert(2, "two");
    assert_eq!(keys(&b), [2]);
}

#[test]
fn test_extend() {
    let mut map: RbTreeMap<i32, i32> = RbTreeMap::default();
    map.extend([(1, 1), (2, 2)]);
    map.extend([(&2, &20), (&3, &30)]);
    let pairs: Vec<_> = map.iter().map(|(&k, &v)| (k, v)).collect();
    assert_eq!(pairs, [(1, 1), (2, 2), (3, 30)]);
    assert!(map.max_size() > map.len());
}
