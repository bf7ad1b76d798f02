use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::{Array1, Array2};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use weather_predict::prelude::*;

fn create_weather_data(side: usize) -> (Array2<f64>, Array1<f64>) {
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    let temperature = Array2::from_shape_fn((side, side), |_| rng.gen_range(-5.0..35.0));
    let humidity = Array2::from_shape_fn((side, side), |_| rng.gen_range(20.0..100.0));
    let wind_speed = Array2::from_shape_fn((side, side), |_| rng.gen_range(0.0..20.0));
    let x = prepare_data(&temperature, &humidity, &wind_speed).unwrap();

    // Next-day temperature: persistence + humidity and wind effects + noise
    let y = x
        .rows()
        .into_iter()
        .map(|r| 0.8 * r[0] + 0.02 * r[1] - 0.1 * r[2] + rng.gen::<f64>() * 0.5)
        .collect();

    (x, y)
}

fn bench_training(c: &mut Criterion) {
    let mut group = c.benchmark_group("training");
    group.sample_size(10); // Fewer samples for training benchmarks

    for side in [10, 30, 60].iter() {
        let data = create_weather_data(*side);

        group.bench_with_input(BenchmarkId::new("linear", side * side), &data, |b, (x, y)| {
            b.iter(|| train_model(black_box(x), black_box(y), "linear").unwrap())
        });
    }

    // Reduced grid keeps the forest search measurable
    let config = TrainingConfig::default().with_param_grid(ForestParamGrid {
        n_estimators: vec![20, 50],
        max_depth: vec![None, Some(10)],
    });
    for side in [10, 20].iter() {
        let data = create_weather_data(*side);

        group.bench_with_input(BenchmarkId::new("random_forest", side * side), &data, |b, (x, y)| {
            b.iter(|| train_model_with_config(black_box(x), black_box(y), ModelType::RandomForest, &config).unwrap())
        });
    }

    group.finish();
}

fn bench_prediction(c: &mut Criterion) {
    let mut group = c.benchmark_group("prediction");

    // Train model once
    let (x, y) = create_weather_data(20);
    let config = TrainingConfig::default().with_param_grid(ForestParamGrid {
        n_estimators: vec![100],
        max_depth: vec![Some(10)],
    });
    let model = train_model_with_config(&x, &y, ModelType::RandomForest, &config).unwrap();

    for side in [10, 50, 100].iter() {
        let (current, _) = create_weather_data(*side);

        group.bench_with_input(BenchmarkId::new("predict_future", side * side), &current, |b, current| {
            b.iter(|| predict_future(&model, black_box(current)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_training, bench_prediction);
criterion_main!(benches);
