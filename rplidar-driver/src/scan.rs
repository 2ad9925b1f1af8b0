use crate::constants::RANGE_MIN;
use crate::numeric::{degree_to_radian, to_angle, to_intensity, to_range};
use crate::time::CaptureWindow;
use rplidar_data::{MeasurementNode, ScanFrame};

/// Per-session values stamped onto an assembled frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameContext<'a> {
    pub sequence: u32,
    pub source_id: &'a str,
    /// Maximum range in meters.
    pub range_max: f32,
}

pub(crate) trait RPLidarScan {
    fn new(
        context: &FrameContext,
        capture: &CaptureWindow,
        angle_min: f64,
        angle_max: f64,
        n_nodes: usize,
    ) -> ScanFrame;
    fn push_ranges(&mut self, nodes: &[MeasurementNode]);
    fn push_intensities(&mut self, nodes: &[MeasurementNode]);
}

impl RPLidarScan for ScanFrame {
    fn new(
        context: &FrameContext,
        capture: &CaptureWindow,
        angle_min: f64,
        angle_max: f64,
        n_nodes: usize,
    ) -> ScanFrame {
        ScanFrame {
            sequence: context.sequence,
            source_id: context.source_id.to_string(),
            capture_time: capture.start_ns,
            capture_duration: capture.duration_ns,
            angle_min,
            angle_max,
            angle_increment: (angle_max - angle_min) / ((n_nodes - 1) as f64),
            range_min: RANGE_MIN,
            range_max: context.range_max,
            ranges: Vec::with_capacity(n_nodes),
            intensities: Vec::with_capacity(n_nodes),
        }
    }

    fn push_ranges(&mut self, nodes: &[MeasurementNode]) {
        self.ranges
            .extend(nodes.iter().map(|node| to_range(node.dist_mm_q2)));
    }

    fn push_intensities(&mut self, nodes: &[MeasurementNode]) {
        self.intensities
            .extend(nodes.iter().map(|node| to_intensity(node.quality)));
    }
}

/// Indices of the first and last node with a return, or `None` if no node has one.
pub(crate) fn valid_node_range(nodes: &[MeasurementNode]) -> Option<(usize, usize)> {
    let start_node = nodes.iter().position(|node| node.has_return())?;
    let end_node = nodes.iter().rposition(|node| node.has_return())?;
    Some((start_node, end_node))
}

fn node_angle_radian(node: &MeasurementNode) -> f64 {
    degree_to_radian(to_angle(node.angle_z_q14))
}

/// Builds a frame from a burst already sorted by ascending angle.
///
/// The angular bounds come from the first and last node with a return, while
/// `ranges` and `intensities` cover every node of the burst. Returns `None`
/// for bursts with fewer than two nodes, without any return, or whose valid
/// nodes are not in ascending order.
pub fn assemble(
    nodes: &[MeasurementNode],
    capture: CaptureWindow,
    context: FrameContext,
) -> Option<ScanFrame> {
    if nodes.len() < 2 {
        return None;
    }
    let (start_node, end_node) = valid_node_range(nodes)?;

    let angle_min = node_angle_radian(&nodes[start_node]);
    let angle_max = node_angle_radian(&nodes[end_node]);
    if angle_max < angle_min {
        log::debug!(
            "Burst is not in ascending order ({} > {}), dropping it",
            angle_min,
            angle_max
        );
        return None;
    }

    let mut scan = ScanFrame::new(&context, &capture, angle_min, angle_max, nodes.len());
    scan.push_ranges(nodes);
    scan.push_intensities(nodes);
    Some(scan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    const CONTEXT: FrameContext = FrameContext {
        sequence: 7,
        source_id: "laser",
        range_max: 12.,
    };

    fn capture() -> CaptureWindow {
        CaptureWindow::new(1_700_000_000_000_000_000, 7_000_000)
    }

    fn burst(distances: &[u32], qualities: &[u8]) -> Vec<MeasurementNode> {
        let step = (16384 * 4 / distances.len()) as u16;
        distances
            .iter()
            .zip(qualities)
            .enumerate()
            .map(|(i, (d, q))| MeasurementNode::new(i as u16 * step, *d, *q))
            .collect()
    }

    #[test]
    fn test_valid_node_range() {
        let nodes = burst(&[0, 0, 100, 0, 300, 400, 0, 0], &[0; 8]);
        assert_eq!(valid_node_range(&nodes), Some((2, 5)));

        let nodes = burst(&[100, 0, 0, 400], &[0; 4]);
        assert_eq!(valid_node_range(&nodes), Some((0, 3)));

        let nodes = burst(&[0, 0, 5, 0], &[0; 4]);
        assert_eq!(valid_node_range(&nodes), Some((2, 2)));

        assert_eq!(valid_node_range(&burst(&[0; 6], &[0; 6])), None);
        assert_eq!(valid_node_range(&[]), None);
    }

    #[test]
    fn test_assemble_trims_seam() {
        let nodes = burst(
            &[0, 0, 100, 200, 300, 400, 0, 0],
            &[12, 200, 40, 40, 40, 40, 3, 255],
        );
        let scan = assemble(&nodes, capture(), CONTEXT).unwrap();

        // start_node = 2 at 90 degrees, end_node = 5 at 225 degrees
        assert_relative_eq!(scan.angle_min, PI / 2.);
        assert_relative_eq!(scan.angle_max, PI * 5. / 4.);
        assert_relative_eq!(scan.angle_increment, (PI * 5. / 4. - PI / 2.) / 7.);

        assert_eq!(scan.ranges.len(), 8);
        assert_eq!(scan.intensities.len(), 8);
        assert_eq!(scan.ranges[2..6], [0.025, 0.05, 0.075, 0.1]);
        for i in [0, 1, 6, 7] {
            assert_eq!(scan.ranges[i], f32::INFINITY);
        }
        assert_eq!(scan.intensities[2..6], [10, 10, 10, 10]);
        assert_eq!(scan.intensities[..2], [3, 50]);
        assert_eq!(scan.intensities[6..], [0, 63]);
    }

    #[test]
    fn test_assemble_metadata() {
        let nodes = burst(&[40, 80, 120, 160], &[8; 4]);
        let scan = assemble(&nodes, capture(), CONTEXT).unwrap();

        assert_eq!(scan.sequence, 7);
        assert_eq!(scan.source_id, "laser");
        assert_eq!(scan.capture_time, 1_700_000_000_000_000_000);
        assert_eq!(scan.capture_duration, 7_000_000);
        assert_eq!(scan.range_min, 0.15);
        assert_eq!(scan.range_max, 12.);
        assert_eq!(scan.sample_interval(), 7_000_000. / 3.);
        assert_relative_eq!(
            scan.sample_interval() * (scan.len() - 1) as f64,
            scan.capture_duration as f64
        );
        assert_eq!(scan.angle_min, 0.);
        assert!(scan.angle_max >= scan.angle_min);
    }

    #[test]
    fn test_assemble_all_invalid() {
        for n in [2, 3, 8, 360 * 8] {
            let nodes = burst(&vec![0; n], &vec![40; n]);
            assert_eq!(assemble(&nodes, capture(), CONTEXT), None);
        }
    }

    #[test]
    fn test_assemble_too_short() {
        assert_eq!(assemble(&[], capture(), CONTEXT), None);
        let nodes = [MeasurementNode::new(100, 400, 40)];
        assert_eq!(assemble(&nodes, capture(), CONTEXT), None);
    }

    #[test]
    fn test_assemble_single_valid_node() {
        let nodes = burst(&[0, 400, 0], &[40; 3]);
        let scan = assemble(&nodes, capture(), CONTEXT).unwrap();
        assert_eq!(scan.angle_min, scan.angle_max);
        assert_eq!(scan.angle_increment, 0.);
        assert_eq!(scan.ranges, vec![f32::INFINITY, 0.1, f32::INFINITY]);
    }

    #[test]
    fn test_assemble_rejects_descending_bounds() {
        let nodes = vec![
            MeasurementNode::new(30000, 400, 40),
            MeasurementNode::new(20000, 400, 40),
            MeasurementNode::new(10000, 400, 40),
        ];
        assert_eq!(assemble(&nodes, capture(), CONTEXT), None);
    }
}
