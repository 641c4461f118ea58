use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dfa_infer::dfa::Dfa;
use dfa_infer::equivalence::automaton_match;
use dfa_infer::gold::{gold, GoldOptions};
use dfa_infer::lstar::learner::Learner;
use dfa_infer::lstar::teacher::Teacher;
use std::collections::HashSet;
use std::rc::Rc;

/// Accepts binary strings with an even number of 1s.
fn parity_dfa() -> Dfa {
    Dfa::make_automaton(
        &[(0usize, 0, '0'), (0, 1, '1'), (1, 0, '1'), (1, 1, '0')],
        &0,
        &HashSet::from([0]),
    )
}

fn parity_samples() -> (HashSet<String>, HashSet<String>) {
    let dfa = parity_dfa();
    let mut s_plus = HashSet::new();
    let mut s_minus = HashSet::new();
    for len in 0..12 {
        for bits in 0..(1u32 << len) {
            let w: String = (0..len).map(|i| if bits & (1 << i) != 0 { '1' } else { '0' }).collect();
            if dfa.accepts(&w) {
                s_plus.insert(w);
            } else {
                s_minus.insert(w);
            }
        }
    }
    (s_plus, s_minus)
}

pub fn gold_inference(c: &mut Criterion) {
    let (s_plus, s_minus) = parity_samples();
    let options = GoldOptions {
        alphabet: "01".to_string(),
        ..Default::default()
    };
    c.bench_function("gold inference", |b| {
        b.iter(|| gold(black_box(&s_plus), black_box(&s_minus), &options))
    });
}

pub fn lstar_inference(c: &mut Criterion) {
    let reference = Rc::new(parity_dfa());
    let teacher = Teacher::new(reference).unwrap();
    c.bench_function("lstar inference", |b| {
        b.iter(|| Learner::new(black_box(&teacher)).learn())
    });
}

pub fn equivalence_check(c: &mut Criterion) {
    let dfa1 = parity_dfa();
    let dfa2 = parity_dfa();
    c.bench_function("equivalence check", |b| {
        b.iter(|| automaton_match(black_box(&dfa1), black_box(&dfa2)))
    });
}

criterion_group!(benches, gold_inference, lstar_inference, equivalence_check);
criterion_main!(benches);
