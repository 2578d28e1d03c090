use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mudscript_lexer::Lexer;

const MUDSCRIPT_SOURCE: &str = r#"
#include "std/base.h"

// A room that remembers who entered it.
class Room : Thing {
    var description = "A plain room.";
    static var count = 0;

    verb enter(who) {
        count += 1;
        who->tell(this.description);
        if (count > 10 && !quiet) {
            broadcast("It is getting crowded.");
        }
    }

    verb leave(who, where) {
        /* no-op */
        return where;
    }
}
"#;

fn bench_lex(c: &mut Criterion) {
    let source = MUDSCRIPT_SOURCE.repeat(20);
    c.bench_function("lex_rooms", |b| {
        b.iter(|| {
            let tokens = Lexer::new(black_box(&source)).tokenize();
            black_box(tokens);
        });
    });
}

criterion_group!(benches, bench_lex);
criterion_main!(benches);
