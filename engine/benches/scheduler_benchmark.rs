/*!
 * Scheduler Benchmarks
 *
 * Ordered queue insertion cost and full arrival/completion workloads per policy
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sched_engine::{OrderedQueue, Policy, Scheduler, Time};
use std::cmp::Ordering;

const CORES: usize = 4;

fn workload(jobs: usize, seed: u64) -> Vec<(Time, Time, i32)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut now = 0;
    (0..jobs)
        .map(|_| {
            now += rng.gen_range(0..3);
            (now, rng.gen_range(1..50), rng.gen_range(0..8))
        })
        .collect()
}

fn run(policy: Policy, jobs: &[(Time, Time, i32)]) -> f64 {
    let mut scheduler = Scheduler::with_policy(CORES, policy).unwrap();
    let mut now = 0;
    for (n, &(time, running_time, priority)) in jobs.iter().enumerate() {
        scheduler
            .new_job(n as u32, time, running_time, priority)
            .unwrap();
        now = time;
    }

    // Drain by completing whatever runs on each core
    loop {
        let mut progressed = false;
        for core in 0..CORES {
            let running = scheduler
                .running_job(core)
                .unwrap()
                .map(|job| job.job_number);
            if let Some(job) = running {
                now += 1;
                scheduler.job_finished(core, job, now).unwrap();
                progressed = true;
            }
        }
        if !progressed {
            break;
        }
    }

    scheduler.average_waiting_time().unwrap()
}

fn bench_queue_offer(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue_offer");

    for size in [64usize, 512, 4096] {
        let keys: Vec<u32> = {
            let mut rng = StdRng::seed_from_u64(7);
            (0..size).map(|_| rng.gen()).collect()
        };

        group.bench_with_input(BenchmarkId::from_parameter(size), &keys, |b, keys| {
            b.iter(|| {
                let cmp: fn(&u32, &u32) -> Ordering = |a, b| a.cmp(b);
                let mut queue = OrderedQueue::new(cmp);
                for &key in keys {
                    queue.offer(key).unwrap();
                }
                black_box(queue.len())
            });
        });
    }

    group.finish();
}

fn bench_policies(c: &mut Criterion) {
    let mut group = c.benchmark_group("policy_workload");
    let jobs = workload(1_000, 42);

    for policy in Policy::ALL {
        group.bench_with_input(
            BenchmarkId::from_parameter(policy.as_str()),
            &jobs,
            |b, jobs| b.iter(|| black_box(run(policy, jobs))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_queue_offer, bench_policies);
criterion_main!(benches);
