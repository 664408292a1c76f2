use coord_frames::{
    AxisPermutation, BasicFrame, CompoundFrame, Frame, Parallel, Permutation, Transformation,
    Zoom, find_match,
};
use criterion::{Criterion, criterion_group, criterion_main};
use faer::rand::{Rng, SeedableRng, rngs::SmallRng};
use std::{hint::black_box, sync::Arc};

fn coords(npoints: usize, ndim: usize) -> Vec<Vec<f64>> {
    let mut rng = SmallRng::seed_from_u64(1991);
    let mut pts = Vec::with_capacity(npoints);
    for _ in 0..npoints {
        let mut pt = Vec::with_capacity(ndim);
        for _ in 0..ndim {
            pt.push(rng.random::<f64>() * 100.0);
        }
        pts.push(pt);
    }
    pts
}

fn bench_transform<T: Transformation + ?Sized>(c: &mut Criterion, name: &str, t: &T) {
    let coords = coords(1000, t.input_ndim());
    let mut buf = vec![f64::NAN; t.output_ndim()];
    c.bench_function(name, |b| {
        b.iter(|| {
            for pt in coords.iter() {
                t.transform_into(pt, &mut buf);
                black_box(&buf);
            }
        })
    });
}

fn permutation(c: &mut Criterion) {
    let t = Permutation::from_out_map(3, &[Some(2), Some(1), Some(0)]).unwrap();
    bench_transform(c, "permutation", &t);
}

fn parallel(c: &mut Criterion) {
    let t = Parallel::new(
        Arc::new(Zoom::try_new(2, 2.0).unwrap()),
        Arc::new(Permutation::from_out_map(2, &[Some(1), Some(0)]).unwrap()),
    );
    bench_transform(c, "parallel", &t);
}

fn tagged(domain: &str) -> Arc<dyn Frame> {
    Arc::new(BasicFrame::new(1).with_domain(domain))
}

/// Nested compound of single-axis frames, with axes presented in reverse order.
fn nested(domains: &[&str]) -> Arc<dyn Frame> {
    let mut frame = tagged(domains[0]);
    for d in domains[1..].iter() {
        frame = Arc::new(CompoundFrame::new(frame, tagged(d)));
    }
    let n = domains.len();
    let reversed: Vec<usize> = (0..n).rev().collect();
    Arc::new(
        CompoundFrame::new(frame, tagged("LAST"))
            .permuted(&AxisPermutation::try_new(&[reversed, vec![n]].concat()).unwrap())
            .unwrap(),
    )
}

fn match_nested(c: &mut Criterion) {
    let template = nested(&["A", "B", "C", "D"]);
    let target = nested(&["D", "C", "B", "A"]);
    c.bench_function("match_nested", |b| {
        b.iter(|| black_box(find_match(template.as_ref(), target.as_ref()).unwrap()))
    });

    let found = find_match(template.as_ref(), target.as_ref())
        .unwrap()
        .unwrap();
    bench_transform(c, "matched_mapping", found.mapping.as_ref());
}

criterion_group!(transforms, permutation, parallel);
criterion_group!(frames, match_nested);
criterion_main!(transforms, frames);
