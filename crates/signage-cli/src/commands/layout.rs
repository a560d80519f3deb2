//! `signage layout` commands

use clap::{Args, Subcommand};
use signage_core::{Layout, LayoutAttributes, LayoutFilter, Region};
use signage_engine::commands::layout::{
    add_region, copy_layout, create_layout, delete_layout, list_layouts, load_layout,
    set_layout_owner, NewLayout,
};

use super::{CommandResult, Session};

#[derive(Debug, Args)]
pub struct LayoutArgs {
    #[command(subcommand)]
    pub command: LayoutCommand,
}

#[derive(Debug, Subcommand)]
pub enum LayoutCommand {
    /// Create a layout with its campaign
    Add(AddArgs),
    /// Print one layout with its regions and widgets
    Show(ShowArgs),
    /// List layouts
    List(ListArgs),
    /// Copy a layout under a new name
    Copy(CopyArgs),
    /// Delete a layout and move its displays to the fallback layout
    Delete(DeleteArgs),
    /// Add a region to a layout
    AddRegion(AddRegionArgs),
    /// Hand a layout to another user
    SetOwner(SetOwnerArgs),
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub owner: i64,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub width: u32,
    #[arg(long)]
    pub height: u32,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long = "tag")]
    pub tags: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub layout_id: i64,
    /// Also load playlists and widgets
    #[arg(long)]
    pub playlists: bool,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long)]
    pub owner: Option<i64>,
    /// Substring of the layout name
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub retired: Option<bool>,
}

#[derive(Debug, Args)]
pub struct CopyArgs {
    pub layout_id: i64,
    #[arg(long)]
    pub name: String,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    pub layout_id: i64,
}

#[derive(Debug, Args)]
pub struct AddRegionArgs {
    pub layout_id: i64,
    #[arg(long)]
    pub owner: i64,
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long)]
    pub width: u32,
    #[arg(long)]
    pub height: u32,
    #[arg(long, default_value_t = 0)]
    pub top: u32,
    #[arg(long, default_value_t = 0)]
    pub left: u32,
}

#[derive(Debug, Args)]
pub struct SetOwnerArgs {
    pub layout_id: i64,
    #[arg(long)]
    pub owner: i64,
}

pub fn execute(args: LayoutArgs, session: &mut Session) -> CommandResult {
    match args.command {
        LayoutCommand::Add(add) => execute_add(add, session),
        LayoutCommand::Show(show) => execute_show(show, session),
        LayoutCommand::List(list) => execute_list(list, session),
        LayoutCommand::Copy(copy) => {
            let layout = copy_layout(
                &mut session.conn,
                &session.ctx,
                &session.engine,
                copy.layout_id,
                &copy.name,
            )?;
            print_saved("Copied", &layout);
            Ok(())
        }
        LayoutCommand::Delete(delete) => {
            let mut layout = load_layout(
                &session.conn,
                &session.ctx,
                &session.engine,
                delete.layout_id,
                false,
            )?;
            delete_layout(&mut session.conn, &session.ctx, &session.engine, &mut layout)?;
            println!("Deleted {}", layout.name());
            Ok(())
        }
        LayoutCommand::AddRegion(region_args) => {
            let region = Region::new(
                region_args.owner,
                region_args.name,
                region_args.width,
                region_args.height,
            )
            .with_position(region_args.top, region_args.left);
            let layout = add_region(
                &mut session.conn,
                &session.ctx,
                &session.engine,
                region_args.layout_id,
                region,
            )?;
            println!("{}", layout);
            Ok(())
        }
        LayoutCommand::SetOwner(owner_args) => {
            let layout = set_layout_owner(
                &mut session.conn,
                &session.ctx,
                &session.engine,
                owner_args.layout_id,
                owner_args.owner,
            )?;
            println!("Owner of {} set to {}", layout.name(), layout.owner_id());
            Ok(())
        }
    }
}

fn execute_add(args: AddArgs, session: &mut Session) -> CommandResult {
    let attributes =
        LayoutAttributes::new(args.name, args.width, args.height).with_description(args.description);
    let mut input = NewLayout::new(args.owner, attributes);
    input.tags = args.tags;

    let layout = create_layout(&mut session.conn, &session.ctx, &session.engine, input)?;
    print_saved("Added", &layout);
    Ok(())
}

fn execute_show(args: ShowArgs, session: &mut Session) -> CommandResult {
    let layout = load_layout(
        &session.conn,
        &session.ctx,
        &session.engine,
        args.layout_id,
        args.playlists,
    )?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&layout)?);
        return Ok(());
    }

    println!("{}", layout);
    println!("  owner_id: {}", layout.owner_id());
    println!("  campaign_id: {}", layout.campaign_id().unwrap_or(0));
    println!("  content_hash: {}", layout.content_hash());
    for region in layout.regions() {
        println!(
            "  region {}: {} ({} x {} at {},{})",
            region.region_id.unwrap_or(0),
            region.name,
            region.width,
            region.height,
            region.top,
            region.left
        );
    }
    if args.playlists {
        for widget in layout.get_widgets() {
            println!(
                "  widget {}: {} {}s",
                widget.widget_id.unwrap_or(0),
                widget.widget_type,
                widget.duration
            );
        }
    }
    let tags: Vec<&str> = layout.tags().iter().map(|t| t.tag.as_str()).collect();
    if !tags.is_empty() {
        println!("  tags: {}", tags.join(", "));
    }
    Ok(())
}

fn execute_list(args: ListArgs, session: &mut Session) -> CommandResult {
    let filter = LayoutFilter {
        owner_id: args.owner,
        name_like: args.name,
        retired: args.retired,
        ..LayoutFilter::default()
    };

    for layout in list_layouts(&session.conn, &session.ctx, &filter)? {
        println!(
            "{}\t{}\t{}\t{}x{}",
            layout.layout_id().unwrap_or(0),
            layout.owner_id(),
            layout.name(),
            layout.attributes().width,
            layout.attributes().height
        );
    }
    Ok(())
}

fn print_saved(verb: &str, layout: &Layout) {
    println!("{} {}", verb, layout.name());
    println!("  layout_id: {}", layout.layout_id().unwrap_or(0));
    println!("  campaign_id: {}", layout.campaign_id().unwrap_or(0));
}
