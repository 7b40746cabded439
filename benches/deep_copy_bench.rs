//! Quick benchmark for deep copy and deep merge

use helpkit::{deep_copy, deep_merge, ArrayMode, GraphValue};
use serde_json::{json, Value};
use std::time::Instant;

fn wide_value(width: usize) -> Value {
    let items: Vec<Value> = (0..width)
        .map(|i| json!({"id": i, "tags": ["a", "b"], "meta": {"n": i * 2}}))
        .collect();
    json!({"items": items, "name": "bench"})
}

fn main() {
    println!("Deep Copy Performance");
    println!("=====================\n");

    for width in [10, 100, 1_000] {
        let source = GraphValue::from(wide_value(width));
        let iterations: u32 = 1_000;

        let start = Instant::now();
        for _ in 0..iterations {
            let _ = deep_copy(&source);
        }
        let elapsed = start.elapsed();

        println!("Width: {}", width);
        println!("  Time for {} iterations: {:?}", iterations, elapsed);
        println!("  Per operation: {:?}\n", elapsed / iterations);
    }

    // Shared references: one node referenced from every slot
    let shared = GraphValue::from(wide_value(100));
    let fan_out = GraphValue::array((0..1_000).map(|_| shared.clone()));
    let start = Instant::now();
    let copy = deep_copy(&fan_out);
    println!("Fan-out of 1000 shared refs: {:?}", start.elapsed());
    println!("  Copy still shares: {}\n", copy.at(0).zip(copy.at(999)).is_some_and(|(a, b)| a.ptr_eq(&b)));

    println!("Deep Merge Performance");
    println!("======================\n");

    let base = wide_value(1_000);
    let over = json!({"items": [{"id": 0}], "name": "override", "extra": {"k": "v"}});
    let iterations: u32 = 1_000;

    for mode in [ArrayMode::Replace, ArrayMode::Merge] {
        let start = Instant::now();
        for _ in 0..iterations {
            let _ = deep_merge(&base, &over, mode);
        }
        let elapsed = start.elapsed();
        println!("Mode: {}", mode);
        println!("  Per operation: {:?}\n", elapsed / iterations);
    }
}
