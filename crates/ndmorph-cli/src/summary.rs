use std::path::Path;

use console::Style;
use ndmorph_core::inspect::is_binary;
use ndmorph_core::kernel::DiscreteKernel;
use ndmorph_core::morph::MorphConfig;
use ndmorph_core::resample::{ResampleConfig, Resampler, SamplingScheme};
use ndmorph_core::NdArray;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_array_summary(path: &Path, array: &NdArray) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Array"));
    println!();
    println!("  {:<14}{}", s.label.apply_to("File"), s.path.apply_to(path.display()));
    println!("  {:<14}{}", s.label.apply_to("Dimensions"), s.value.apply_to(format!("{:?}", array.dims())));
    println!("  {:<14}{}", s.label.apply_to("Strides"), s.value.apply_to(format!("{:?}", array.strides())));
    println!("  {:<14}{}", s.label.apply_to("Spacing"), s.value.apply_to(format!("{:?}", array.spacing())));
    println!("  {:<14}{}", s.label.apply_to("Elements"), s.value.apply_to(array.len()));

    let missing = array.count_missing();
    if missing > 0 {
        println!("  {:<14}{}", s.label.apply_to("Missing"), s.disabled.apply_to(missing));
    }

    let (min, max) = array
        .data()
        .iter()
        .filter(|v| !v.is_nan())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if min <= max {
        println!("  {:<14}{}", s.label.apply_to("Range"), s.value.apply_to(format!("[{min}, {max}]")));
    }

    let check = is_binary(array.data());
    let binary = match (check.binary, check.value) {
        (true, Some(v)) => format!("yes (foreground = {v})"),
        (true, None) => "yes (all zero)".to_string(),
        (false, _) => "no".to_string(),
    };
    println!("  {:<14}{}", s.label.apply_to("Binary"), s.method.apply_to(binary));
    println!();
}

pub fn print_morph_summary(config: &MorphConfig, kernel: &DiscreteKernel) {
    let s = Styles::new();

    println!();
    println!("  {}", s.header.apply_to("Morphology"));
    println!("    {:<12}{}", s.label.apply_to("Kernel"), s.value.apply_to(format!("{:?}", kernel.values().dims())));
    println!("    {:<12}{}", s.label.apply_to("Element op"), s.method.apply_to(config.element_op));
    println!("    {:<12}{}", s.label.apply_to("Merge op"), s.method.apply_to(config.merge_op));
    if config.restrictions.is_empty() {
        println!("    {:<12}{}", s.label.apply_to("Restrict"), s.disabled.apply_to("none"));
    } else {
        println!("    {:<12}{}", s.label.apply_to("Restrict"), s.value.apply_to(format!("{:?}", config.restrictions)));
    }
    if !config.renormalise {
        println!("    {:<12}{}", s.label.apply_to("Renormalise"), s.disabled.apply_to("off"));
    }
    println!();
}

pub fn print_resample_summary(config: &ResampleConfig) {
    let s = Styles::new();
    let resampler = Resampler::from_spec(&config.kernel);

    println!();
    println!("  {}", s.header.apply_to("Resampling"));
    println!("    {:<12}{}", s.label.apply_to("Kernel"), s.method.apply_to(&config.kernel));
    println!("    {:<12}{}", s.label.apply_to("Width"), s.value.apply_to(resampler.kernel_width()));
    let presharpen = if resampler.needs_presharpen() { "yes" } else { "no" };
    println!("    {:<12}{}", s.label.apply_to("Presharpen"), s.value.apply_to(presharpen));
    match &config.scheme {
        SamplingScheme::Grid { locations } => {
            let counts: Vec<usize> = locations.iter().map(Vec::len).collect();
            println!("    {:<12}{}", s.label.apply_to("Grid"), s.value.apply_to(format!("{counts:?}")));
        }
        SamplingScheme::Points { points } => {
            println!("    {:<12}{}", s.label.apply_to("Points"), s.value.apply_to(points.len()));
        }
    }
    println!();
}
