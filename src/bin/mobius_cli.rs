#[cfg(target_arch = "wasm32")]
fn main() {
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(err) = native::run() {
        eprintln!("mobius_cli error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use mobius_engine::geom::{
        GeomContext, MobiusParams, MobiusReport, MobiusStrip, RenderOptions, TimingBucket,
        mesh_strip_with_context,
    };

    const DEFAULT_RESOLUTIONS: [usize; 3] = [50, 200, 800];

    const USAGE: &str = r#"mobius_cli (mobius-engine)

USAGE:
  mobius_cli report [options]
  mobius_cli convergence [options]

COMMANDS:
  report         Print surface area and edge length of one strip
  convergence    Print both measurements for several resolutions

OPTIONS:
  --radius <R>           Centre radius, > 0 (default 1.0)
  --width <w>            Strip width, > 0 (default 0.2)
  --resolution <n>       Samples per parameter, >= 2 (default 200; report only)
  --resolutions <a,b,..> Comma-separated resolutions (default 50,200,800; convergence only)
  --stats                Also print display-mesh diagnostics (report only)
  -h, --help             Show this help
"#;

    #[derive(Debug, Clone, PartialEq)]
    struct Options {
        params: MobiusParams,
        resolutions: Vec<usize>,
        stats: bool,
        help: bool,
    }

    impl Default for Options {
        fn default() -> Self {
            Self {
                params: MobiusParams::default(),
                resolutions: DEFAULT_RESOLUTIONS.to_vec(),
                stats: false,
                help: false,
            }
        }
    }

    pub fn run() -> Result<(), String> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let mut args = Args::new(args);

        let Some(command) = args.next() else {
            print_usage();
            return Ok(());
        };

        match command.as_str() {
            "report" => {
                let options = parse_options(&mut args)?;
                if options.help {
                    print_usage();
                    return Ok(());
                }
                cmd_report(&options)
            }
            "convergence" => {
                let options = parse_options(&mut args)?;
                if options.help {
                    print_usage();
                    return Ok(());
                }
                cmd_convergence(&options)
            }
            "-h" | "--help" | "help" => {
                print_usage();
                Ok(())
            }
            other => Err(format!("unknown command `{other}`\n\n{USAGE}")),
        }
    }

    fn print_usage() {
        println!("{USAGE}");
    }

    fn parse_options(args: &mut Args) -> Result<Options, String> {
        let mut options = Options::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--radius" => options.params.radius = parse_f64("--radius", &args.value("--radius")?)?,
                "--width" => options.params.width = parse_f64("--width", &args.value("--width")?)?,
                "--resolution" => {
                    options.params.resolution =
                        parse_usize("--resolution", &args.value("--resolution")?)?;
                }
                "--resolutions" => {
                    options.resolutions = args
                        .value("--resolutions")?
                        .split(',')
                        .map(|part| parse_usize("--resolutions", part.trim()))
                        .collect::<Result<_, _>>()?;
                }
                "--stats" => options.stats = true,
                "-h" | "--help" => options.help = true,
                other => return Err(format!("unknown option `{other}`\n\n{USAGE}")),
            }
        }

        Ok(options)
    }

    fn parse_f64(flag: &str, raw: &str) -> Result<f64, String> {
        raw.parse::<f64>()
            .map_err(|e| format!("invalid value `{raw}` for {flag}: {e}"))
    }

    fn parse_usize(flag: &str, raw: &str) -> Result<usize, String> {
        raw.parse::<usize>()
            .map_err(|e| format!("invalid value `{raw}` for {flag}: {e}"))
    }

    fn cmd_report(options: &Options) -> Result<(), String> {
        let mut ctx = GeomContext::new();
        ctx.metrics.begin();

        let strip = MobiusStrip::with_context(options.params, &mut ctx).map_err(|e| e.to_string())?;
        let report = timed_report(&strip, &mut ctx);
        let timing = ctx.metrics.end();

        println!("{report}");

        if options.stats {
            let (_mesh, diagnostics) =
                mesh_strip_with_context(&strip, RenderOptions::default(), &mut ctx)
                    .map_err(|e| e.to_string())?;
            println!("display mesh: {diagnostics}");
            if let Some(timing) = timing {
                println!(
                    "timing: mesh={}ns area={}ns edge={}ns",
                    timing.mesh_generation_ns, timing.surface_area_ns, timing.edge_length_ns
                );
            }
        }
        Ok(())
    }

    /// Both measurements, each timed in its own bucket of `ctx.metrics`.
    fn timed_report(strip: &MobiusStrip, ctx: &mut GeomContext) -> MobiusReport {
        MobiusReport {
            surface_area: ctx
                .metrics
                .time(TimingBucket::SurfaceArea, || strip.surface_area()),
            edge_length: ctx
                .metrics
                .time(TimingBucket::EdgeLength, || strip.edge_length()),
        }
    }

    fn cmd_convergence(options: &Options) -> Result<(), String> {
        let rows = convergence_rows(options)?;

        println!("{:>8}  {:>12}  {:>12}  {:>12}", "n", "area", "edge", "Δarea");
        for row in &rows {
            let delta = row
                .area_delta
                .map_or_else(|| "-".to_string(), |d| format!("{d:.5}"));
            println!(
                "{:>8}  {:>12.5}  {:>12.5}  {:>12}",
                row.resolution, row.area, row.edge, delta
            );
        }
        Ok(())
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct ConvergenceRow {
        resolution: usize,
        area: f64,
        edge: f64,
        area_delta: Option<f64>,
    }

    fn convergence_rows(options: &Options) -> Result<Vec<ConvergenceRow>, String> {
        let mut rows: Vec<ConvergenceRow> = Vec::with_capacity(options.resolutions.len());
        for &resolution in &options.resolutions {
            let params = MobiusParams {
                resolution,
                ..options.params
            };
            let strip = MobiusStrip::new(params).map_err(|e| e.to_string())?;
            let report = strip.report();
            let area_delta = rows
                .last()
                .map(|prev| (report.surface_area - prev.area).abs());
            rows.push(ConvergenceRow {
                resolution,
                area: report.surface_area,
                edge: report.edge_length,
                area_delta,
            });
        }
        Ok(rows)
    }

    struct Args {
        args: Vec<String>,
        pos: usize,
    }

    impl Args {
        fn new(args: Vec<String>) -> Self {
            Self { args, pos: 0 }
        }

        fn next(&mut self) -> Option<String> {
            let arg = self.args.get(self.pos)?.clone();
            self.pos += 1;
            Some(arg)
        }

        fn value(&mut self, flag: &str) -> Result<String, String> {
            self.next()
                .ok_or_else(|| format!("missing value for {flag}"))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn parse(raw: &[&str]) -> Result<Options, String> {
            let mut args = Args::new(raw.iter().map(ToString::to_string).collect());
            parse_options(&mut args)
        }

        #[test]
        fn defaults_match_reference_parameters() {
            let options = parse(&[]).unwrap();
            assert_eq!(options.params, MobiusParams::new(1.0, 0.2, 200));
            assert_eq!(options.resolutions, vec![50, 200, 800]);
            assert!(!options.stats);
        }

        #[test]
        fn parses_all_flags() {
            let options = parse(&[
                "--radius",
                "2.5",
                "--width",
                "0.4",
                "--resolution",
                "300",
                "--resolutions",
                "10, 20,40",
                "--stats",
            ])
            .unwrap();
            assert_eq!(options.params, MobiusParams::new(2.5, 0.4, 300));
            assert_eq!(options.resolutions, vec![10, 20, 40]);
            assert!(options.stats);
        }

        #[test]
        fn rejects_bad_values_and_unknown_flags() {
            assert!(parse(&["--radius"]).unwrap_err().contains("missing value"));
            assert!(parse(&["--width", "wide"]).unwrap_err().contains("--width"));
            assert!(parse(&["--resolution", "-3"]).is_err());
            assert!(parse(&["--colour"]).unwrap_err().contains("unknown option"));
        }

        #[test]
        fn convergence_rows_report_successive_differences() {
            let options = Options {
                resolutions: vec![20, 40, 80],
                ..Options::default()
            };
            let rows = convergence_rows(&options).unwrap();
            assert_eq!(rows.len(), 3);
            assert_eq!(rows[0].area_delta, None);
            let d1 = rows[1].area_delta.unwrap();
            let d2 = rows[2].area_delta.unwrap();
            assert!(d2 < d1);
        }

        #[test]
        fn timed_report_matches_strip_report() {
            let strip = MobiusStrip::from_parts(1.0, 0.2, 300).unwrap();
            let mut ctx = GeomContext::new();
            let report = timed_report(&strip, &mut ctx);
            assert_eq!(report, strip.report());
            assert_eq!(
                report.to_string(),
                "Surface Area ≈ 1.26550\nEdge Length ≈ 12.58192"
            );
        }

        #[test]
        fn convergence_surfaces_invalid_resolution() {
            let options = Options {
                resolutions: vec![1],
                ..Options::default()
            };
            let err = convergence_rows(&options).unwrap_err();
            assert!(err.contains("resolution"));
        }
    }
}
