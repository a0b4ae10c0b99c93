use alloy::sol;

sol! {
    #[derive(Debug)]
    contract KeypersConfigsList {
        event NewConfig(uint64 activationBlockNumber, uint64 index, uint64 threshold);
    }

    #[derive(Debug)]
    contract DecryptorsConfigsList {
        event NewConfig(uint64 activationBlockNumber, uint64 index);
    }

    /// Shared by the BLS public key and BLS signature registries.
    #[derive(Debug)]
    contract Registry {
        event Registered(address a, bytes data);
    }

    #[derive(Debug)]
    #[sol(rpc)]
    contract AddrsSeq {
        function getAddrs(uint64 n) external view returns (address[] memory);
    }
}
