use rand::prelude::*;
use rigsite::*;

fn main() {
  env_logger::builder()
    .filter_level(log::LevelFilter::Info)
    .init();

  // binary formulation of the reference instance
  let problem = Problem::builder()
    .parameters(ProblemParameters::reference())
    .domain(Domain::Binary)
    .build();

  // a stand-in for an evolutionary optimizer: random binary candidates...
  let mut rng = StdRng::seed_from_u64(1);
  let population: Vec<Vec<f64>> = (0..100_000)
    .map(|_| problem.domain().sample(problem.dimensions(), &mut rng))
    .collect();

  // ...evaluated concurrently for each batch of candidates
  let results = problem
    .clone()
    .par_batch()
    .evaluate_batch(&population)
    .expect("candidates are sampled with the right length");

  let mut feasible: Vec<_> = population
    .iter()
    .zip(&results)
    .filter(|(_, r)| r.is_feasible())
    .collect();
  log::info!(
    "{} of {} candidates are feasible",
    feasible.len(),
    population.len()
  );
  feasible.sort_by(|(_, a), (_, b)| a.cost().total_cmp(&b.cost()));

  // and print the 5 cheapest feasible layouts
  println!("  cost  | production |   damage   | wells per platform");
  for (vector, result) in feasible.into_iter().take(5) {
    let (x, _) = decode(vector, problem.dimensions()).unwrap();
    let layout = (0..x.rows())
      .map(|i| format!("{:?}", x.active(i, 0.5)))
      .collect::<Vec<_>>()
      .join(" ");
    println!(
      "{:>7.1} | {:>10.1} | {:>10.1} | {layout}",
      result.cost(),
      result.production(),
      result.damage(),
    );
  }
}
