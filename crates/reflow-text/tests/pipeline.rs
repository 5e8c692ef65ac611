//! End-to-end tests: positioned fragments in, normalized page text out.

use std::sync::mpsc;

use reflow_text::{PageAssembler, PositionedFragment, TextPipeline, normalize, reconstruct_lines};

fn frag(text: &str, x: f32, y: f32) -> PositionedFragment {
    PositionedFragment::new(text, x, y)
}

/// A résumé page, shuffled so nothing relies on input order.
fn resume_page() -> Vec<PositionedFragment> {
    vec![
        frag("tion", 0.0, 690.0),
        frag("Doe", 40.0, 760.0),
        frag("K", 10.0, 740.0),
        frag("Experience", 0.0, 700.0),
        frag("Rust,", 10.0, 728.0),
        frag("S", 0.0, 740.0),
        frag("I", 20.0, 740.0),
        frag("2019", 80.0, 700.0),
        frag("L", 30.0, 740.0),
        frag("work.", 30.0, 690.0),
        frag("-", 110.0, 700.0),
        frag("L", 40.0, 740.0),
        frag("\u{2022}", 0.0, 728.0),
        frag("2021", 120.0, 700.0),
        frag("S", 50.0, 740.0),
        frag("Led", 160.0, 700.0),
        frag("Go", 50.0, 728.0),
        frag("migra-", 190.0, 700.0),
        frag("Jane", 0.0, 760.0),
        frag("Shipped", 70.0, 690.0),
        frag("v2.", 120.0, 690.0),
    ]
}

#[test]
fn reconstructs_resume_page() {
    assert_eq!(
        reconstruct_lines(&resume_page()),
        "Jane Doe\n\nS K I L L S\n\u{2022} Rust, Go\n\n\
         Experience 2019 - 2021 Led migration work.\n\nShipped v2."
    );
}

#[test]
fn normalizes_resume_page() {
    let pipeline = TextPipeline::default();
    assert_eq!(
        pipeline.process_page(&resume_page()),
        "Jane Doe\n\nSKILLS:\nRust, Go\n\nExperience:\n\n2019 - 2021\n\n\
         Led migration work.\n\nShipped v2."
    );
}

#[test]
fn normalized_page_is_stable() {
    let once = TextPipeline::default().process_page(&resume_page());
    assert_eq!(normalize(&once), once);
}

#[test]
fn pages_finishing_out_of_order_are_reassembled() {
    let pages: Vec<Vec<PositionedFragment>> = (0..6)
        .map(|i| vec![frag(&format!("page{i}"), 0.0, 100.0)])
        .collect();
    let pipeline = TextPipeline::default().with_separator("\n---\n");

    let (tx, rx) = mpsc::channel();
    std::thread::scope(|s| {
        for (index, fragments) in pages.iter().enumerate().rev() {
            let tx = tx.clone();
            let pipeline = &pipeline;
            s.spawn(move || {
                tx.send((index, pipeline.process_page(fragments))).unwrap();
            });
        }
    });
    drop(tx);

    let mut assembler = pipeline.assembler();
    for (index, text) in rx {
        assembler.insert(index, text);
    }
    let expected = (0..6)
        .map(|i| format!("page{i}"))
        .collect::<Vec<_>>()
        .join("\n---\n");
    assert_eq!(assembler.finish(), expected);
    assert_eq!(pipeline.process_pages(&pages), expected);
}

#[test]
fn assembler_is_order_independent() {
    let texts = ["alpha", "beta", "gamma"];
    let mut forward = PageAssembler::default();
    let mut backward = PageAssembler::default();
    for (i, t) in texts.iter().enumerate() {
        forward.insert(i, t.to_string());
    }
    for (i, t) in texts.iter().enumerate().rev() {
        backward.insert(i, t.to_string());
    }
    assert_eq!(forward.finish(), backward.finish());
}
