use rand::{prelude::random, rngs::StdRng, Rng, SeedableRng};
use structopt::StructOpt;

use std::time;

use treelist::TreeList;

/// Command line options.
#[derive(Clone, StructOpt)]
pub struct Opt {
    #[structopt(long = "seed")]
    seed: Option<u64>,

    #[structopt(long = "loads", default_value = "100000")] // default 100K
    loads: usize,

    #[structopt(long = "adds", default_value = "0")]
    adds: usize,

    #[structopt(long = "removes", default_value = "0")]
    removes: usize,

    #[structopt(long = "gets", default_value = "0")]
    gets: usize,

    #[structopt(long = "views", default_value = "0")]
    views: usize,
}

fn main() {
    let opts = Opt::from_args();
    let seed = opts.seed.unwrap_or_else(random);
    println!("seed {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut list: TreeList<u64> = TreeList::new();

    // initial load
    let start = time::Instant::now();
    for _i in 0..opts.loads {
        list.add(rng.gen()).unwrap();
    }
    println!("loaded {} items in {:?}", opts.loads, start.elapsed());

    do_incremental(&mut rng, &opts, &mut list);
    do_views(&mut rng, &opts, &list);

    let start = time::Instant::now();
    let mut n = 0;
    for item in list.iter() {
        item.unwrap();
        n += 1;
    }
    println!("iterating {} items took {:?}", n, start.elapsed());

    let start = time::Instant::now();
    list.validate().unwrap();
    println!("validated {} items in {:?}", list.len(), start.elapsed());
}

fn do_incremental(rng: &mut StdRng, opts: &Opt, list: &mut TreeList<u64>) {
    let total = opts.adds + opts.removes + opts.gets;
    let (mut n_hits, mut n) = (0, total);

    let start = time::Instant::now();
    while n > 0 {
        let op = rng.gen::<usize>() % total;

        if op < opts.adds {
            list.add(rng.gen()).unwrap();
        } else if op < (opts.adds + opts.removes) {
            // remove an existing element, found through a random index.
            if !list.is_empty() {
                let index = rng.gen::<usize>() % list.len();
                list.remove_at(index).unwrap();
                n_hits += 1;
            }
        } else if !list.is_empty() {
            let index = rng.gen::<usize>() % list.len();
            let item = list.get(index).unwrap();
            if list.contains(&item).unwrap() {
                n_hits += 1;
            }
        }
        n -= 1;
    }
    println!(
        "incremental for operations {}, hits {}, took {:?}",
        total,
        n_hits,
        start.elapsed()
    );
}

fn do_views(rng: &mut StdRng, opts: &Opt, list: &TreeList<u64>) {
    let start = time::Instant::now();
    let mut n_items = 0;
    for _i in 0..opts.views {
        let (a, b): (u64, u64) = (rng.gen(), rng.gen());
        let view = list.range(a.min(b)..=a.max(b)).unwrap();
        for item in view.iter().unwrap() {
            item.unwrap();
            n_items += 1;
        }
    }
    println!(
        "views {}, scanned {} items, took {:?}",
        opts.views,
        n_items,
        start.elapsed()
    );
}
