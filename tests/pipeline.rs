use lang_mood::{
    config::{Columns, Config},
    corpus::Corpus,
    plot::Plotter,
    progress::ProgressReport,
    resources::Resources,
    sentiment::Polarity,
    series::{self, Collection, SeriesPoint},
    stats, summary, top,
};
use std::{fs, path::Path};

fn write_dataset(path: &Path, rows: &[(&str, &str)]) {
    let contents = rows
        .iter()
        .map(|(content, date)| {
            format!("{}\n", serde_json::json!({ "content": content, "date": date }))
        })
        .collect::<String>();
    fs::write(path, contents).unwrap();
}

#[test]
fn two_tweet_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("csharp.json");
    fs::write(
        &path,
        concat!(
            r#"{"content":"I love C#!! visit http://x.co @bob","date":"2020-01-01T00:00:00"}"#,
            "\n",
            r#"{"content":"I hate this language","date":"2020-01-02T00:00:00"}"#,
            "\n",
        ),
    )
    .unwrap();
    let resources = Resources::init().unwrap();
    let report = ProgressReport::hidden();

    let corpus = Corpus::load(&path, &Columns::default(), &report).unwrap();
    assert_eq!(corpus.len(), 2);
    let cleaned = corpus.clean(resources.cleaner(), &report);
    let tokens = |idx: usize| cleaned[idx].iter().map(|token| &**token).collect::<Vec<_>>();
    let first_tokens = tokens(0);
    assert_eq!(first_tokens, ["love", "visit"]);
    assert!(first_tokens
        .iter()
        .all(|&token| token != "bob" && token != "http" && token != "x"));
    assert_eq!(tokens(1), ["hate", "language"]);

    let scored = corpus.score(resources.scorer(), &report);
    let (first, second) = (scored.scores()[0], scored.scores()[1]);
    assert!(first > 0.0, "{first}");
    assert!(second < 0.0, "{second}");

    let point = SeriesPoint::summarize(&scored).unwrap();
    assert!((point.mean_score - (first + second) / 2.0).abs() < 1e-12);
    assert_eq!(&*point.date, "2020-01-02T00:00:00");

    let positive = summary::most_positive(&scored, 5);
    assert_eq!(positive.len(), 1);
    assert_eq!(positive[0].index, 0);
    let negative = summary::most_negative(&scored, 5);
    assert_eq!(negative.len(), 1);
    assert_eq!(negative[0].index, 1);

    // Per-polarity rankings, without any plot
    let positive =
        top::frequency_by_sentiment(&scored, Polarity::Positive, resources.cleaner(), &report);
    assert_eq!(top::top(&positive, 20, 0), [("love", 1), ("visit", 1)]);
    let negative =
        top::frequency_by_sentiment(&scored, Polarity::Negative, resources.cleaner(), &report);
    assert_eq!(top::top(&negative, 20, 1), [("language", 1)]);
}

#[test]
fn collection_series_follows_shard_names() {
    let dir = tempfile::tempdir().unwrap();
    for (day, content) in [
        ("2022-06-03", "Java is awful and I hate it"),
        ("2022-06-01", "I love Java, it is great"),
        ("2022-06-02", "Java 17 was released"),
    ] {
        write_dataset(
            &dir.path().join(format!("{day}_java.json")),
            &[(content, &format!("{day}T12:00:00")[..])],
        );
    }
    // Neither of these is a shard of the java collection
    write_dataset(&dir.path().join("java.json"), &[("ignored", "2000-01-01")]);
    write_dataset(
        &dir.path().join("2022-06-01_javascript.json"),
        &[("ignored", "2000-01-01")],
    );

    let collection = Collection::discover(dir.path(), "java").unwrap();
    assert_eq!(collection.shards().len(), 3);
    let resources = Resources::init().unwrap();
    let series = collection
        .series(&Columns::default(), &resources, &ProgressReport::hidden())
        .unwrap();
    assert_eq!(series.name(), "java");
    let days = series
        .points()
        .iter()
        .map(|point| series::day(&point.date))
        .collect::<Vec<_>>();
    assert_eq!(days, ["2022-06-01", "2022-06-02", "2022-06-03"]);
    assert!(series.points()[0].mean_score > 0.0);
    assert!(series.points()[2].mean_score < 0.0);
    assert_eq!(series.date_range(), Some(("2022-06-01", "2022-06-03")));
}

#[test]
fn empty_collection_gives_empty_series() {
    let dir = tempfile::tempdir().unwrap();
    let collection = Collection::discover(dir.path(), "csharp").unwrap();
    assert!(collection.shards().is_empty());
    let resources = Resources::init().unwrap();
    let series = collection
        .series(&Columns::default(), &resources, &ProgressReport::hidden())
        .unwrap();
    assert!(series.is_empty());
}

#[test]
fn malformed_shard_fails_the_series() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(
        &dir.path().join("2022-06-01_java.json"),
        &[("fine", "2022-06-01")],
    );
    fs::write(
        dir.path().join("2022-06-02_java.json"),
        "{\"content\": \"no date here\"}\n",
    )
    .unwrap();
    let collection = Collection::discover(dir.path(), "java").unwrap();
    let resources = Resources::init().unwrap();
    let error = collection
        .series(&Columns::default(), &resources, &ProgressReport::hidden())
        .unwrap_err();
    let message = format!("{error:#}");
    assert!(message.contains("2022-06-02_java.json"), "{message}");
    assert!(message.contains("line 1"), "{message}");
}

#[test]
fn reference_dataset_plots() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        data_dir: dir.path().to_owned(),
        output_dir: dir.path().join("plots"),
        ..Config::reference().unwrap()
    };
    let dataset = &config.datasets[1];
    let path = config.dataset_path(dataset);
    write_dataset(
        &path,
        &[
            ("Java is great, I love Java", "2022-06-01T08:00:00"),
            ("Java builds are slow and I hate waiting", "2022-06-01T09:00:00"),
            ("Coffee and Java, a great morning", "2022-06-01T10:00:00"),
        ],
    );
    let resources = Resources::init().unwrap();
    let report = ProgressReport::hidden();
    let corpus = Corpus::load(&path, &config.columns, &report).unwrap();
    let cleaned = corpus.clean(resources.cleaner(), &report);
    let frequencies = stats::frequency(cleaned.iter().map(|tokens| &tokens[..]));
    let ranked = top::top(&frequencies, config.top_words.get(), config.skipped_top_words);
    assert!(ranked.iter().all(|&(token, _count)| token != "java"));

    let plotter = Plotter::new(&config.output_dir).unwrap();
    let plot = plotter
        .plot_frequencies(
            "java_frequency.svg",
            &ranked,
            config.top_words.get(),
            &dataset.gradient,
            &lang_mood::plot::frequency_title(&path),
        )
        .unwrap();
    assert_eq!(plot, config.output_dir.join("java_frequency.svg"));
    assert!(fs::read_to_string(plot).unwrap().contains("Frequency distribution of words in java"));
}
