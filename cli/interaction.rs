use anyhow::Result;
use console::style;
use dialoguer::Confirm;

pub fn confirm_patching(file_count: usize, class_count: usize, no_confirm: bool) -> Result<bool> {
    if no_confirm {
        return Ok(true);
    }
    if file_count == 0 {
        println!("No files to patch.");
        return Ok(false);
    }

    let prompt = format!(
        "Patch {} {} in {} {} in place?",
        style(class_count).cyan(),
        if class_count == 1 { "class" } else { "classes" },
        style(file_count).cyan(),
        if file_count == 1 { "file" } else { "files" }
    );

    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?;

    if !confirmed {
        println!("Aborted by user.");
    }

    Ok(confirmed)
}
