use criterion::{black_box, criterion_group, criterion_main, Criterion};

use oefenen_core::feedback::compose;
use oefenen_core::grader::{grade_exercise, grade_question};
use oefenen_core::model::*;

fn make_question(id: &str, kind: QuestionKind, correct: AnswerValue) -> ExerciseQuestion {
    ExerciseQuestion {
        id: id.into(),
        kind,
        question: String::new(),
        options: vec![],
        correct_answer: correct,
        explanation: None,
    }
}

fn make_exercise() -> (ExerciseData, UserAnswers) {
    let questions = vec![
        make_question("q0", QuestionKind::Fill, "loopt".into()),
        make_question("q1", QuestionKind::MultipleChoice, "het".into()),
        make_question("q2", QuestionKind::Checkbox, vec!["de", "het", "een"].into()),
        make_question(
            "q3",
            QuestionKind::SwipeSort {
                items: vec![
                    SwipeItem { text: "huis".into(), target: Some("het".into()) },
                    SwipeItem { text: "tafel".into(), target: None },
                ],
                targets: vec!["de".into(), "het".into()],
            },
            vec!["het", "de"].into(),
        ),
        make_question(
            "q4",
            QuestionKind::MemoryMatch { pairs: vec![] },
            vec!["hond-dog", "kat-cat"].into(),
        ),
        make_question(
            "q5",
            QuestionKind::Jigsaw { pieces: vec![], correct_order: vec![0, 1, 2, 3] },
            vec!["0", "1", "2", "3"].into(),
        ),
        make_question("q6", QuestionKind::Dictation { audio_text: None }, "hallo wereld".into()),
        make_question("q7", QuestionKind::ImageDescription { image_url: None }, "een rode fiets".into()),
        make_question("q8", QuestionKind::Transformation, "ik liep".into()),
        make_question("q9", QuestionKind::WordMath { parts: vec![] }, "fiets|pad".into()),
    ];

    let mut answers = UserAnswers::new();
    answers.insert("q0", "Loopt");
    answers.insert("q1", "het");
    answers.insert("q2", vec!["een", "de", "het"]);
    answers.insert("q3", vec!["het", "de"]);
    answers.insert("q4", vec!["kat-cat", "hond-dog"]);
    answers.insert("q5", vec!["0", "1", "3", "2"]);
    answers.insert("q6", "Hallo, wereld!");
    answers.insert("q7", "een rode fiets");
    answers.insert("q8", "ik loop");
    answers.insert("q9", "fiets | pad");

    let exercise = ExerciseData {
        id: "bench".into(),
        title: "Bench".into(),
        level: None,
        topic: String::new(),
        introduction: String::new(),
        explanation: String::new(),
        questions,
    };
    (exercise, answers)
}

fn bench_grade_exercise(c: &mut Criterion) {
    let (exercise, answers) = make_exercise();
    c.bench_function("grade_exercise/ten_mixed", |b| {
        b.iter(|| grade_exercise(black_box(&exercise), black_box(&answers)))
    });
}

fn bench_grade_question(c: &mut Criterion) {
    let mut group = c.benchmark_group("grade_question");
    let (exercise, answers) = make_exercise();

    for q in &exercise.questions {
        let answer = answers.get(&q.id);
        group.bench_function(q.kind.question_type().to_string(), |b| {
            b.iter(|| grade_question(black_box(q), black_box(answer)))
        });
    }

    group.finish();
}

fn bench_compose(c: &mut Criterion) {
    c.bench_function("compose/all_scores", |b| {
        b.iter(|| {
            for score in 0..=100u32 {
                black_box(compose(black_box(score)));
            }
        })
    });
}

criterion_group!(benches, bench_grade_exercise, bench_grade_question, bench_compose);
criterion_main!(benches);
