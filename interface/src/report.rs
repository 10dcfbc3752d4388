use std::fmt;
use std::path::Path;

use analysis::ArmReport;
use kinematics::Workspace;
use kinematics::angles::wrap_degrees;

/// Human-readable summary of an [`ArmReport`].
pub struct Summary<'a>(pub &'a ArmReport);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let [l1, l2, l3] = report.links.lengths();
        writeln!(f, "links: {l1} {l2} {l3}")?;

        for (branch, q) in report.position.configs() {
            let label = match branch {
                Some(branch) => format!("{branch:?}").to_lowercase(),
                None => "given".to_string(),
            };
            let tip = report.end_effector(&q);
            let [q1, q2, q3] = q.angles();
            writeln!(f, "solution ({label}): q = [{q1:.4}, {q2:.4}, {q3:.4}] deg")?;
            writeln!(
                f,
                "  a = {:.4}, b = {:.4}, theta = {:.4} deg",
                tip.translation.vector.x,
                tip.translation.vector.y,
                wrap_degrees(q.orientation())
            )?;
            let chain: Vec<String> = report
                .chain(&q)
                .iter()
                .map(|p| format!("({:.3}, {:.3})", p.x, p.y))
                .collect();
            writeln!(f, "  chain: {}", chain.join(" -> "))?;
        }

        writeln!(f, "jacobian:")?;
        for row in report.jacobian.row_iter() {
            writeln!(f, "  [{:10.4} {:10.4} {:10.4}]", row[0], row[1], row[2])?;
        }
        for (i, tau) in report.torque.iter().enumerate() {
            writeln!(f, "torque{}: {tau:.4}", i + 1)?;
        }

        write!(f, "workspace: {} points", report.workspace.len())?;
        if let Some((lo, hi)) = report.workspace.bounds() {
            write!(
                f,
                ", x in [{:.3}, {:.3}], y in [{:.3}, {:.3}]",
                lo.x, hi.x, lo.y, hi.y
            )?;
        }
        writeln!(f)
    }
}

/// Writes the point cloud as `x,y` records under a header row.
pub fn write_workspace_csv(path: &Path, workspace: &Workspace) -> csv::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["x", "y"])?;
    for p in workspace.points() {
        writer.serialize((p.x, p.y))?;
    }
    writer.flush()?;
    Ok(())
}
