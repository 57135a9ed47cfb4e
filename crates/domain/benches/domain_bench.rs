use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};
use domain::{Catalog, FlavorId, OrderSession, PaymentMethod, PizzaBuilder, SizeId};

fn bench_build_pizza(c: &mut Criterion) {
    let catalog = Arc::new(Catalog::standard());

    c.bench_function("domain/build_pizza", |b| {
        b.iter(|| {
            let mut builder = PizzaBuilder::new(Arc::clone(&catalog));
            builder.choose_size(SizeId::new(4)).unwrap();
            for id in [1, 5, 9, 13] {
                builder.choose_flavor(FlavorId::new(id)).unwrap();
            }
            builder.add_soda().unwrap();
            builder.add_stuffed_crust().unwrap();
            builder.complete().unwrap()
        });
    });
}

fn bench_full_order_cycle(c: &mut Criterion) {
    let catalog = Arc::new(Catalog::standard());

    c.bench_function("domain/full_order_cycle", |b| {
        b.iter(|| {
            let mut session = OrderSession::new(Arc::clone(&catalog));
            session.start_new_pizza().unwrap();
            for more in [true, true, false] {
                session.choose_size(SizeId::new(2)).unwrap();
                for id in [2, 4, 6] {
                    session.choose_flavor(FlavorId::new(id)).unwrap();
                }
                session.add_soda().unwrap();
                session.complete_pizza().unwrap();
                session.continue_or_deliver(more).unwrap();
            }
            session.set_delivery(true).unwrap();
            session.select_payment(PaymentMethod::Pix).unwrap();
            session.confirm_payment(true).unwrap();
            session.reset().unwrap();
            session
        });
    });
}

criterion_group!(benches, bench_build_pizza, bench_full_order_cycle);
criterion_main!(benches);
