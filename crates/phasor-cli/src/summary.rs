use console::Style;
use phasor_core::bandpass::BandPassControlPoints;
use phasor_core::config::CombinerConfig;
use phasor_core::Geometry;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    disabled: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            disabled: Style::new().dim().yellow(),
        }
    }
}

fn join<V: std::fmt::Display>(values: &[V]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" x ")
}

pub fn print_geometry(title: &str, geometry: &Geometry) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to(title));
    println!(
        "  {:<18}{}",
        s.label.apply_to("Size"),
        s.value.apply_to(join(&geometry.size))
    );
    println!(
        "  {:<18}{}",
        s.label.apply_to("Spacing"),
        s.value.apply_to(join(&geometry.spacing))
    );
    println!(
        "  {:<18}{}",
        s.label.apply_to("Start index"),
        s.value.apply_to(join(&geometry.start_index))
    );
    match geometry.actual_real_size {
        Some(n) => println!(
            "  {:<18}{}",
            s.label.apply_to("Actual real size"),
            s.value.apply_to(n)
        ),
        None => println!(
            "  {:<18}{}",
            s.label.apply_to("Actual real size"),
            s.disabled.apply_to("none")
        ),
    }
}

pub fn print_combiner(config: &CombinerConfig, max_dist: f64) {
    let s = Styles::new();
    let points: BandPassControlPoints = config.band_pass;
    let scaled = points.as_array().map(|c| c * max_dist);

    println!();
    println!("  {}", s.title.apply_to("Band-pass"));
    println!(
        "  {:<18}{}",
        s.label.apply_to("Control points"),
        s.value.apply_to(points)
    );
    println!(
        "  {:<18}{}",
        s.label.apply_to("Max radius"),
        s.value.apply_to(format!("{max_dist:.3}"))
    );
    println!(
        "  {:<18}{}",
        s.label.apply_to("Radii"),
        s.value.apply_to(format!(
            "{:.2} / {:.2} / {:.2} / {:.2}",
            scaled[0], scaled[1], scaled[2], scaled[3]
        ))
    );
    println!(
        "  {:<18}{}",
        s.label.apply_to("Splitter"),
        s.value.apply_to(config.parallel.splitter)
    );
    println!();
}
