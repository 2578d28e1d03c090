use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mudscript_parser::{parse_source_document, Parser};

const MUDSCRIPT_SOURCE: &str = r#"
class Room : Thing {
    var description = "A plain room.";
    static var count = 0;

    verb enter(who) {
        count += 1;
        who->tell(this.description);
        if (count > 10 && !quiet) {
            broadcast("It is getting crowded.");
        } else {
            exits[count % 4].open();
        }
    }

    verb leave(who, where) {
        switch (where) {
        case 0: return null;
        default:
            while (who.busy) who.wait(1);
        }
        return where ? where : new Void();
    }
}
"#;

fn bench_parse(c: &mut Criterion) {
    let source = MUDSCRIPT_SOURCE.repeat(20);
    c.bench_function("parse_rooms", |b| {
        b.iter(|| {
            let tree = parse_source_document(black_box(&source));
            black_box(tree);
        });
    });

    let mut parser = Parser::new();
    c.bench_function("parse_rooms_reused_parser", |b| {
        b.iter(|| {
            let tree = parser.parse_source_document(black_box(&source));
            black_box(tree);
        });
    });
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
