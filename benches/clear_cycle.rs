use criterion::{black_box, criterion_group, criterion_main, Criterion};
use firecookies::cookies::monster::CookieMonster;
use firecookies::cookies::store::CookieStore;
use firecookies::fire::{CookiePreserver, RemoveAllCookies};
use std::sync::Arc;

fn populate(jar: &CookieMonster) {
    jar.set_raw_cookie("https://duckduckgo.com", "ae=d");
    jar.set_raw_cookie("https://duckduckgo.com", "s=l");
    jar.set_raw_cookie("https://surveys.duckduckgo.com", "answer=3");
    for i in 0..200 {
        jar.set_raw_cookie(&format!("https://site{}.example", i % 40), &format!("c{}=v", i));
    }
}

fn benchmark_clear_cycle(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let jar = Arc::new(CookieMonster::new());
    let store: Arc<dyn CookieStore> = jar.clone();
    let preserver = CookiePreserver::new(store.clone(), Arc::new(RemoveAllCookies::new(store)));
    let preserver = &preserver;

    c.bench_function("clear_cycle_default_allow_list", |b| {
        b.to_async(&rt).iter(|| {
            populate(&jar);
            async move { black_box(preserver.remove_external_cookies().await) }
        })
    });
}

fn benchmark_set_raw_cookie(c: &mut Criterion) {
    let jar = CookieMonster::new();

    c.bench_function("set_raw_cookie", |b| {
        b.iter(|| {
            jar.set_raw_cookie(black_box("https://example.com"), black_box("foo=bar; Path=/"));
        })
    });
}

criterion_group!(benches, benchmark_clear_cycle, benchmark_set_raw_cookie);
criterion_main!(benches);
