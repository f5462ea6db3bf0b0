use hinted_expressions::evaluator::Evaluator;
use hinted_expressions::types::error::Result;
use hinted_expressions::types::hint::Hint;
use hinted_expressions::types::record::Record;
use hinted_expressions::types::value::Value;

use std::collections::HashMap;

fn main() -> Result<()> {
    let mut vars: HashMap<String, Value> = HashMap::new();
    vars.insert(
        "wallet".to_string(),
        Record::builder()
            .field("money", 1000)
            .on_primitive(|_, this, hint| match hint {
                Hint::String => Ok(Value::from("wallet")),
                _ => this.get_member("money"),
            })
            .build(),
    );
    vars.insert("two".to_string(), Record::builder().stringify(|_, _| Ok(Value::from("2"))).without_valuate().build());

    let eval = Evaluator::new(vars);
    for src in ["wallet + 1", "wallet * 2", "String(wallet)", "two + 2", "two * 2", "two < '10'"] {
        println!("{} => {:?}", src, eval.evaluate_str(src)?);
    }
    println!("{}", eval.evaluate_interpolated("my ${wallet} holds ${wallet.money}")?);

    Ok(())
}
