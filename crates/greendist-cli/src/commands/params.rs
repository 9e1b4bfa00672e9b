//! Parameter listing command.

use clap::Args;
use greendist_effects::Param;

#[derive(Args)]
pub struct ParamsArgs {
    /// Show a single parameter (id or name)
    #[arg(value_name = "PARAM")]
    param: Option<String>,
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    let params: Vec<Param> = match &args.param {
        Some(name) => {
            let param =
                Param::from_id(name).ok_or_else(|| anyhow::anyhow!("Unknown parameter: {name}"))?;
            vec![param]
        }
        None => Param::ALL.to_vec(),
    };

    println!("Parameters:");
    println!();
    println!(
        "  {:10}  {:10}  {:18}  {:10}  {}",
        "Id", "Name", "Range", "Default", "Unit"
    );
    println!(
        "  {:10}  {:10}  {:18}  {:10}  {}",
        "--", "----", "-----", "-------", "----"
    );

    for param in params {
        let desc = param.descriptor();
        let range = format!("{} .. {}", desc.min, desc.max);
        println!(
            "  {:10}  {:10}  {:18}  {:10}  {}",
            desc.string_id,
            desc.name,
            range,
            desc.default,
            desc.unit.suffix().trim()
        );
    }

    println!();
    println!("Example usage:");
    println!();
    println!("  greendist process input.wav output.wav --drive 0.8 --param tone=4000");

    Ok(())
}
