//! Definitions of Solidity functions called during deployment

use alloy_sol_types::sol;

sol! {
    interface IENSDaoToken {
        function setMinter(address minter) external;
        function minter() external view returns (address);
    }
}

sol! {
    interface IENSLabelBooker {
        function setRegistrar(address registrar) external;
        function registrar() external view returns (address);
    }
}

sol! {
    interface IENSDeployer {
        function ens() external view returns (address);
        function ethRegistrar() external view returns (address);
        function reverseRegistrar() external view returns (address);
        function publicResolver() external view returns (address);
        function nameWrapper() external view returns (address);
    }
}
